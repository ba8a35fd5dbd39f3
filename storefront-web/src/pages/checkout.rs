use shared::router::{Page, RouterAction};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::{use_dispatch, use_selector};

use crate::models::app_state::AppState;
use crate::services::use_services;

/// Confirms the cart and places one order per restaurant.
#[function_component(CheckoutPage)]
pub fn checkout_page() -> Html {
    let services = use_services();
    let dispatch = use_dispatch::<AppState>();
    let cart = use_selector(|state: &AppState| state.router.cart().clone());
    let user_id = use_selector(|state: &AppState| state.router.user().map(|user| user.id.clone()));
    let address = use_state(String::new);
    let error = use_state(|| None::<String>);
    let placing = use_state(|| false);

    let on_address_change = {
        let address = address.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                address.set(input.value());
            }
        })
    };

    let onsubmit = {
        let cart = cart.clone();
        let address = address.clone();
        let error = error.clone();
        let placing = placing.clone();
        let dispatch = dispatch.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(user_id) = (*user_id).clone() else {
                return;
            };
            let trimmed = address.trim();
            let orders = cart.to_new_orders(&user_id, (!trimmed.is_empty()).then_some(trimmed));
            let data = services.data.clone();
            let dispatch = dispatch.clone();
            let error = error.clone();
            let placing = placing.clone();
            placing.set(true);
            error.set(None);
            spawn_local(async move {
                let total = orders.len();
                for (placed, order) in orders.iter().enumerate() {
                    if let Err(err) = data.place_order(order).await {
                        log::error!("placing order for {} failed: {err}", order.restaurant_id);
                        let message = if placed == 0 {
                            err.user_message()
                        } else {
                            format!(
                                "{placed} of {total} orders were placed and removed from your cart. {}",
                                err.user_message()
                            )
                        };
                        error.set(Some(message));
                        placing.set(false);
                        return;
                    }
                    // Placed lines must not be submitted again on retry.
                    if placed + 1 < total {
                        dispatch.apply(RouterAction::OrderPlaced {
                            restaurant_id: order.restaurant_id.clone(),
                        });
                    }
                }
                log::info!("checkout placed {total} orders");
                placing.set(false);
                dispatch.apply(RouterAction::CheckoutCompleted);
            });
        })
    };

    let on_back = Callback::from(move |_: MouseEvent| {
        dispatch.apply(RouterAction::Navigate(Page::Cart));
    });

    let is_busy = *placing;

    html! {
        <div class="max-w-xl space-y-6">
            <h1 class="text-2xl font-bold">{"Checkout"}</h1>
            <ul class="divide-y divide-base-300">
                { for cart.lines().iter().map(|line| html! {
                    <li class="flex justify-between py-2" key={line.product.id.clone()}>
                        <span>{format!("{} × {}", line.quantity, line.product.name)}</span>
                        <span>{line.product.price()}</span>
                    </li>
                }) }
            </ul>
            <p class="text-lg font-semibold">{format!("Total {}", cart.subtotal())}</p>
            <form class="space-y-4" {onsubmit}>
                if let Some(message) = &*error {
                    <div class="alert alert-error"><span>{message.clone()}</span></div>
                }
                <div class="form-control">
                    <label class="label" for="address">
                        <span class="label-text">{"Delivery address"}</span>
                    </label>
                    <input
                        id="address"
                        class="input input-bordered"
                        type="text"
                        value={(*address).clone()}
                        oninput={on_address_change}
                    />
                </div>
                <div class="flex gap-2">
                    <button class="btn btn-ghost" type="button" onclick={on_back}>{"Back to cart"}</button>
                    <button class="btn btn-primary" type="submit" disabled={is_busy}>
                        {if is_busy { "Placing order..." } else { "Place order" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
