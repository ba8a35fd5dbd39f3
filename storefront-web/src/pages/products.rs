use shared::models::{Product, Restaurant};
use shared::router::RouterAction;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;
use yewdux::prelude::use_dispatch;

use crate::models::app_state::AppState;
use crate::services::use_services;

/// Restaurant listing and menu browser.
#[function_component(ProductsPage)]
pub fn products_page() -> Html {
    let services = use_services();
    let dispatch = use_dispatch::<AppState>();
    let restaurants = use_state(Vec::<Restaurant>::new);
    let products = use_state(Vec::<Product>::new);
    let selected = use_state(|| None::<String>);
    let error = use_state(|| None::<String>);

    {
        let data = services.data.clone();
        let restaurants = restaurants.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match data.list_restaurants().await {
                    Ok(list) => restaurants.set(list),
                    Err(err) => {
                        log::error!("loading restaurants failed: {err}");
                        error.set(Some(err.user_message()));
                    }
                }
            });
            || ()
        });
    }

    {
        let data = services.data.clone();
        let products = products.clone();
        let error = error.clone();
        use_effect_with((*selected).clone(), move |restaurant_id| {
            let restaurant_id = restaurant_id.clone();
            spawn_local(async move {
                match data.list_products(restaurant_id.as_deref()).await {
                    Ok(list) => products.set(list),
                    Err(err) => {
                        log::error!("loading products failed: {err}");
                        error.set(Some(err.user_message()));
                    }
                }
            });
            || ()
        });
    }

    let on_restaurant_change = {
        let selected = selected.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                let value = select.value();
                selected.set((!value.is_empty()).then_some(value));
            }
        })
    };

    let restaurant_name = |id: &str| {
        restaurants
            .iter()
            .find(|restaurant| restaurant.id == id)
            .map(|restaurant| restaurant.name.clone())
            .unwrap_or_default()
    };

    let product_cards = products.iter().map(|product| {
        let onclick = {
            let dispatch = dispatch.clone();
            let product = product.clone();
            Callback::from(move |_: MouseEvent| {
                dispatch.apply(RouterAction::AddToCart(product.clone()));
            })
        };
        html! {
            <div class="card bg-base-200 shadow-sm" key={product.id.clone()}>
                <div class="card-body">
                    <h3 class="card-title">{product.name.clone()}</h3>
                    <p class="text-sm text-base-content/70">{restaurant_name(&product.restaurant_id)}</p>
                    if let Some(description) = &product.description {
                        <p>{description.clone()}</p>
                    }
                    <div class="card-actions justify-between items-center">
                        <span class="font-semibold">{product.price()}</span>
                        <button class="btn btn-primary btn-sm" {onclick}>{"Add to cart"}</button>
                    </div>
                </div>
            </div>
        }
    });

    html! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">{"Restaurants"}</h1>
                <select class="select select-bordered" onchange={on_restaurant_change}>
                    <option value="" selected={selected.is_none()}>{"All restaurants"}</option>
                    { for restaurants.iter().map(|restaurant| html! {
                        <option
                            value={restaurant.id.clone()}
                            selected={selected.as_deref() == Some(restaurant.id.as_str())}
                        >
                            {restaurant.name.clone()}
                            if let Some(cuisine) = &restaurant.cuisine {
                                {format!(" · {cuisine}")}
                            }
                        </option>
                    }) }
                </select>
            </div>
            if let Some(message) = &*error {
                <div class="alert alert-error"><span>{message.clone()}</span></div>
            }
            if products.is_empty() {
                <p class="text-base-content/70">{"Nothing on the menu right now."}</p>
            } else {
                <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
                    { for product_cards }
                </div>
            }
        </div>
    }
}
