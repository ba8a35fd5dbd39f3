use shared::models::format_cents;
use shared::router::{Page, RouterAction};
use yew::prelude::*;
use yewdux::prelude::{use_dispatch, use_selector};

use crate::models::app_state::AppState;

#[function_component(CartPage)]
pub fn cart_page() -> Html {
    let dispatch = use_dispatch::<AppState>();
    let cart = use_selector(|state: &AppState| state.router.cart().clone());

    if cart.is_empty() {
        let browse = {
            let dispatch = dispatch.clone();
            Callback::from(move |_: MouseEvent| dispatch.apply(RouterAction::Navigate(Page::Products)))
        };
        return html! {
            <div class="space-y-4">
                <h1 class="text-2xl font-bold">{"Your cart is empty"}</h1>
                <button class="btn btn-primary" onclick={browse}>{"Browse restaurants"}</button>
            </div>
        };
    }

    let rows: Html = cart.lines().iter().map(|line| {
        let product_id = line.product.id.clone();
        let set_quantity = |quantity: u32| {
            let dispatch = dispatch.clone();
            let product_id = product_id.clone();
            Callback::from(move |_: MouseEvent| {
                dispatch.apply(RouterAction::SetQuantity {
                    product_id: product_id.clone(),
                    quantity,
                });
            })
        };
        let remove = {
            let dispatch = dispatch.clone();
            let product_id = product_id.clone();
            Callback::from(move |_: MouseEvent| {
                dispatch.apply(RouterAction::RemoveFromCart(product_id.clone()));
            })
        };
        html! {
            <tr key={product_id.clone()}>
                <td>{line.product.name.clone()}</td>
                <td>{line.product.price()}</td>
                <td>
                    <div class="join">
                        <button class="btn btn-xs join-item" onclick={set_quantity(line.quantity.saturating_sub(1))}>{"-"}</button>
                        <span class="btn btn-xs join-item no-animation">{line.quantity.to_string()}</span>
                        <button class="btn btn-xs join-item" onclick={set_quantity(line.quantity + 1)}>{"+"}</button>
                    </div>
                </td>
                <td>{format_cents(line.line_total_cents())}</td>
                <td><button class="btn btn-ghost btn-xs" onclick={remove}>{"Remove"}</button></td>
            </tr>
        }
    }).collect();

    let on_clear = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.apply(RouterAction::ClearCart))
    };
    let on_checkout = Callback::from(move |_: MouseEvent| {
        dispatch.apply(RouterAction::Navigate(Page::Checkout));
    });

    html! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">{"Cart"}</h1>
            <table class="table">
                <thead>
                    <tr>
                        <th>{"Item"}</th>
                        <th>{"Price"}</th>
                        <th>{"Quantity"}</th>
                        <th>{"Total"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
            <div class="flex items-center justify-between">
                <button class="btn btn-ghost" onclick={on_clear}>{"Empty cart"}</button>
                <div class="flex items-center gap-4">
                    <span class="text-lg font-semibold">{format!("Subtotal {}", cart.subtotal())}</span>
                    <button class="btn btn-primary" onclick={on_checkout}>{"Checkout"}</button>
                </div>
            </div>
        </div>
    }
}
