use shared::models::{Order, OrderStatus, format_cents};
use shared::router::{Page, RouterAction};
use strum::IntoEnumIterator;
use yew::prelude::*;
use yewdux::prelude::use_dispatch;

#[derive(Properties, PartialEq)]
pub struct OrderDetailsProps {
    pub order: Order,
}

/// Tracking view for the selected order.
#[function_component(OrderDetailsPage)]
pub fn order_details_page(props: &OrderDetailsProps) -> Html {
    let dispatch = use_dispatch::<crate::models::app_state::AppState>();
    let order = &props.order;

    let steps = OrderStatus::iter()
        .filter(|status| *status != OrderStatus::Cancelled)
        .map(|status| {
            let reached = order.status != OrderStatus::Cancelled && status <= order.status;
            html! {
                <li class={classes!("step", reached.then_some("step-primary"))}>{status.label()}</li>
            }
        })
        .collect::<Html>();

    let on_back = Callback::from(move |_: MouseEvent| {
        dispatch.apply(RouterAction::Navigate(Page::History));
    });

    html! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">{format!("Order {}", order.id)}</h1>
            <p class="text-base-content/70">{format!("Placed {}", order.created_at.display())}</p>
            if order.status == OrderStatus::Cancelled {
                <div class="alert alert-warning"><span>{"This order was cancelled."}</span></div>
            } else {
                <ul class="steps w-full">{steps}</ul>
            }
            <table class="table">
                <tbody>
                    { for order.items.iter().map(|item| html! {
                        <tr key={item.product_id.clone()}>
                            <td>{item.name.clone()}</td>
                            <td>{format!("× {}", item.quantity)}</td>
                            <td>{format_cents(item.line_total_cents())}</td>
                        </tr>
                    }) }
                </tbody>
            </table>
            <p class="text-lg font-semibold">{format!("Total {}", order.total())}</p>
            if let Some(address) = &order.delivery_address {
                <p>{format!("Delivering to {address}")}</p>
            }
            <button class="btn btn-ghost" onclick={on_back}>{"Back to orders"}</button>
        </div>
    }
}
