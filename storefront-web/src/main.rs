mod app;
mod components;
mod containers;
mod hooks;
mod models;
mod pages;
mod routes;
mod services;

#[cfg(test)]
mod routes_test;

use app::App;
use services::Services;
use yew::{Html, Renderer, function_component, html, use_memo};
use yew::ContextProvider;
use yew_router::HashRouter;
use yewdux::YewduxRoot;

/// Composition root: builds the backend clients once and provides them,
/// with the store and the hash router, to the rest of the tree.
#[function_component(Root)]
fn root() -> Html {
    let services = use_memo((), |_| Services::from_build_env());

    html! {
        <YewduxRoot>
            <ContextProvider<Services> context={(*services).clone()}>
                <HashRouter>
                    <App />
                </HashRouter>
            </ContextProvider<Services>>
        </YewduxRoot>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::error_1(&format!("logger already initialised: {err}").into());
    }
    log::info!("starting storefront");

    Renderer::<Root>::new().render();
}
