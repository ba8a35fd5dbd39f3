use shared::models::Order;
use shared::router::RouterAction;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yewdux::prelude::{use_dispatch, use_selector};

use crate::models::app_state::AppState;
use crate::services::use_services;

#[function_component(HistoryPage)]
pub fn history_page() -> Html {
    let services = use_services();
    let dispatch = use_dispatch::<AppState>();
    let user_id = use_selector(|state: &AppState| state.router.user().map(|user| user.id.clone()));
    let orders = use_state(|| None::<Vec<Order>>);
    let error = use_state(|| None::<String>);

    {
        let data = services.data.clone();
        let orders = orders.clone();
        let error = error.clone();
        use_effect_with(user_id, move |user_id| {
            if let Some(user_id) = (**user_id).clone() {
                spawn_local(async move {
                    match data.list_orders_for_user(&user_id).await {
                        Ok(list) => orders.set(Some(list)),
                        Err(err) => {
                            log::error!("loading order history failed: {err}");
                            error.set(Some(err.user_message()));
                        }
                    }
                });
            }
            || ()
        });
    }

    let body = match &*orders {
        None if error.is_none() => html! { <span class="loading loading-dots"></span> },
        None => html! {},
        Some(list) if list.is_empty() => html! {
            <p class="text-base-content/70">{"You have not placed any orders yet."}</p>
        },
        Some(list) => html! {
            <table class="table">
                <thead>
                    <tr>
                        <th>{"Placed"}</th>
                        <th>{"Items"}</th>
                        <th>{"Total"}</th>
                        <th>{"Status"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    { for list.iter().map(|order| {
                        let onclick = {
                            let dispatch = dispatch.clone();
                            let order = order.clone();
                            Callback::from(move |_: MouseEvent| {
                                dispatch.apply(RouterAction::TrackOrder(order.clone()));
                            })
                        };
                        html! {
                            <tr key={order.id.clone()}>
                                <td>{order.created_at.display()}</td>
                                <td>{order.item_count().to_string()}</td>
                                <td>{order.total()}</td>
                                <td><span class="badge">{order.status.label()}</span></td>
                                <td><button class="btn btn-sm" {onclick}>{"Track"}</button></td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
        },
    };

    html! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">{"Your orders"}</h1>
            if let Some(message) = &*error {
                <div class="alert alert-error"><span>{message.clone()}</span></div>
            }
            {body}
        </div>
    }
}
