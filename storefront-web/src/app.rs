use shared::models::display_name;
use shared::router::{self, RouterAction, Screen, ScreenDecision};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_store;

use crate::components::loading::Loading;
use crate::containers::{header::Header, layout::Layout};
use crate::hooks::use_session;
use crate::models::app_state::AppState;
use crate::pages::*;
use crate::routes::Route;
use crate::services::use_services;

/// Draw the screen the router settled on.
pub fn render_screen(screen: Screen) -> Html {
    match screen {
        Screen::Loading => html! { <Loading /> },
        Screen::OwnerDashboard => html! { <OwnerDashboardPage /> },
        Screen::Auth => html! { <AuthPage /> },
        Screen::Products => html! { <ProductsPage /> },
        Screen::Cart => html! { <CartPage /> },
        Screen::Checkout => html! { <CheckoutPage /> },
        Screen::History => html! { <HistoryPage /> },
        Screen::Details(order) => html! { <OrderDetailsPage {order} /> },
    }
}

/// Root component: owns the session observer and keeps the address bar and
/// the view router in step. Must be mounted inside a router.
#[function_component(App)]
pub fn app() -> Html {
    let services = use_services();
    use_session(&services);
    let (state, dispatch) = use_store::<AppState>();
    let route = use_route::<Route>().unwrap_or(Route::NotFound);
    let navigator = use_navigator();

    // Page last read from the address bar.
    let url_page = use_mut_ref(|| route.page());

    {
        let dispatch = dispatch.clone();
        let url_page = url_page.clone();
        use_effect_with(route.page(), move |page| {
            *url_page.borrow_mut() = *page;
            dispatch.apply(RouterAction::Navigate(*page));
            || ()
        });
    }

    {
        let dispatch = dispatch.clone();
        use_effect_with(state.router.page(), move |_| {
            // The store may already hold a newer page than this render saw.
            let current = dispatch.get().router.page();
            if current != *url_page.borrow()
                && let Some(navigator) = navigator
            {
                navigator.push(&Route::from(current));
            }
            || ()
        });
    }

    let user = state.router.user().cloned();
    let name = use_memo(user.clone(), |user| display_name(user.as_ref()));
    let item_count = use_memo(state.router.cart().clone(), |cart| cart.item_count());

    let on_sign_out = {
        let auth = services.auth.clone();
        Callback::from(move |()| {
            let auth = auth.clone();
            let dispatch = dispatch.clone();
            spawn_local(async move {
                // Failures are logged by `sign_out`; the state stays as it was.
                if let Ok(action) = router::sign_out(&*auth).await {
                    dispatch.apply(action);
                }
            });
        })
    };

    let content = match state.router.screen() {
        ScreenDecision::Render(screen) => render_screen(screen),
        ScreenDecision::Redirect(page) => html! { <Redirect<Route> to={Route::from(page)} /> },
    };

    let header = html! {
        <Header
            current_page={state.router.page()}
            display_name={AttrValue::from((*name).clone())}
            email={user.as_ref().and_then(|user| user.email.clone()).map(AttrValue::from)}
            signed_in={user.is_some()}
            item_count={*item_count}
            {on_sign_out}
        />
    };

    html! {
        <Layout {header}>
            {content}
        </Layout>
    }
}
