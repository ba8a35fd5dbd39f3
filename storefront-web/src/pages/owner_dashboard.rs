use std::rc::Rc;

use shared::models::{Order, OrderStatus, Restaurant};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;
use yewdux::prelude::use_selector;

use crate::models::app_state::AppState;
use crate::services::use_services;

/// Restaurants the viewer manages: owned ones when signed in, all otherwise.
fn managed(restaurants: Vec<Restaurant>, user_id: Option<&str>) -> Vec<Restaurant> {
    let Some(user_id) = user_id else {
        return restaurants;
    };
    let owned: Vec<Restaurant> = restaurants
        .iter()
        .filter(|restaurant| restaurant.owner_id == user_id)
        .cloned()
        .collect();
    if owned.is_empty() { restaurants } else { owned }
}

/// Orders shown on the dashboard. Updates land on the latest list, so
/// status changes finishing close together all stick.
#[derive(Debug, Default, PartialEq)]
struct OrderList {
    orders: Vec<Order>,
}

enum OrderListAction {
    Loaded(Vec<Order>),
    Updated(Order),
}

impl Reducible for OrderList {
    type Action = OrderListAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            OrderListAction::Loaded(orders) => Rc::new(Self { orders }),
            OrderListAction::Updated(updated) => {
                let orders = self
                    .orders
                    .iter()
                    .map(|order| if order.id == updated.id { updated.clone() } else { order.clone() })
                    .collect();
                Rc::new(Self { orders })
            }
        }
    }
}

/// Incoming orders for a restaurant, with status controls.
#[function_component(OwnerDashboardPage)]
pub fn owner_dashboard_page() -> Html {
    let services = use_services();
    let user_id = use_selector(|state: &AppState| state.router.user().map(|user| user.id.clone()));
    let restaurants = use_state(Vec::<Restaurant>::new);
    let selected = use_state(|| None::<String>);
    let orders = use_reducer(OrderList::default);
    let error = use_state(|| None::<String>);

    {
        let data = services.data.clone();
        let restaurants = restaurants.clone();
        let selected = selected.clone();
        let error = error.clone();
        use_effect_with(user_id, move |user_id| {
            let user_id = (**user_id).clone();
            spawn_local(async move {
                match data.list_restaurants().await {
                    Ok(list) => {
                        let list = managed(list, user_id.as_deref());
                        selected.set(list.first().map(|restaurant| restaurant.id.clone()));
                        restaurants.set(list);
                    }
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
        let orders = orders.clone();
        let error = error.clone();
        use_effect_with((*selected).clone(), move |restaurant_id| {
            if let Some(restaurant_id) = restaurant_id.clone() {
                spawn_local(async move {
                    match data.list_orders_for_restaurant(&restaurant_id).await {
                        Ok(list) => orders.dispatch(OrderListAction::Loaded(list)),
                        Err(err) => {
                            log::error!("loading orders for {restaurant_id} failed: {err}");
                            error.set(Some(err.user_message()));
                        }
                    }
                });
            }
            || ()
        });
    }

    let on_restaurant_change = {
        let selected = selected.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                selected.set(Some(select.value()));
            }
        })
    };

    let set_status = {
        let orders = orders.clone();
        let error = error.clone();
        let data = services.data.clone();
        Callback::from(move |(order_id, status): (String, OrderStatus)| {
            let orders = orders.clone();
            let error = error.clone();
            let data = data.clone();
            spawn_local(async move {
                match data.update_order_status(&order_id, status).await {
                    Ok(updated) => orders.dispatch(OrderListAction::Updated(updated)),
                    Err(err) => {
                        log::error!("updating order {order_id} failed: {err}");
                        error.set(Some(err.user_message()));
                    }
                }
            });
        })
    };

    let rows = orders.orders.iter().map(|order| {
        let advance = order.status.next().map(|next| {
            let set_status = set_status.clone();
            let order_id = order.id.clone();
            let onclick = Callback::from(move |_: MouseEvent| set_status.emit((order_id.clone(), next)));
            html! { <button class="btn btn-primary btn-xs" {onclick}>{format!("Mark {}", next.label())}</button> }
        });
        let cancel = (!order.status.is_terminal()).then(|| {
            let set_status = set_status.clone();
            let order_id = order.id.clone();
            let onclick = Callback::from(move |_: MouseEvent| {
                set_status.emit((order_id.clone(), OrderStatus::Cancelled));
            });
            html! { <button class="btn btn-ghost btn-xs" {onclick}>{"Cancel"}</button> }
        });
        html! {
            <tr key={order.id.clone()}>
                <td>{order.created_at.display()}</td>
                <td>{order.item_count().to_string()}</td>
                <td>{order.total()}</td>
                <td><span class="badge">{order.status.label()}</span></td>
                <td class="flex gap-2">{advance}{cancel}</td>
            </tr>
        }
    });

    html! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">{"Owner dashboard"}</h1>
                <select class="select select-bordered" onchange={on_restaurant_change}>
                    { for restaurants.iter().map(|restaurant| html! {
                        <option
                            value={restaurant.id.clone()}
                            selected={selected.as_deref() == Some(restaurant.id.as_str())}
                        >
                            {restaurant.name.clone()}
                        </option>
                    }) }
                </select>
            </div>
            if let Some(message) = &*error {
                <div class="alert alert-error"><span>{message.clone()}</span></div>
            }
            if orders.orders.is_empty() {
                <p class="text-base-content/70">{"No orders yet."}</p>
            } else {
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
                    <tbody>{ for rows }</tbody>
                </table>
            }
        </div>
    }
}
