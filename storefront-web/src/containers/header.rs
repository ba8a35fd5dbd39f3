use shared::router::Page;
use strum::IntoEnumIterator;
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::components::{header_nav_item::HeaderNavItem, user_dropdown::UserDropdown};
use crate::routes::Route;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub current_page: Page,
    pub display_name: AttrValue,
    #[prop_or_default]
    pub email: Option<AttrValue>,
    pub signed_in: bool,
    pub item_count: u32,
    pub on_sign_out: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let nav_items = || -> Html {
        if !props.signed_in {
            return html! {};
        }
        Page::iter()
            .filter(|page| page.in_navigation())
            .map(|page| {
                let count = if page == Page::Cart { props.item_count } else { 0 };
                html! {
                    <HeaderNavItem {page} current_page={props.current_page} {count} />
                }
            })
            .collect::<Html>()
    };

    html! {
        <nav class="navbar justify-between bg-base-300">
            <Link<Route> to={Route::Home} classes="btn btn-ghost text-lg">
                {"Storefront"}
            </Link<Route>>
            <ul class="menu menu-horizontal">
                { nav_items() }
            </ul>
            <div class="flex items-center gap-2">
                <Link<Route> to={Route::from(Page::OwnerDashboard)} classes="btn btn-ghost btn-sm">
                    {Page::OwnerDashboard.title()}
                </Link<Route>>
                {
                    if props.signed_in {
                        html! {
                            <>
                                <span class="text-sm text-base-content/80 mr-2">{ props.display_name.clone() }</span>
                                <UserDropdown
                                    display_name={props.display_name.clone()}
                                    email={props.email.clone()}
                                    on_sign_out={props.on_sign_out.clone()}
                                />
                            </>
                        }
                    } else {
                        html! {
                            <Link<Route> to={Route::from(Page::Auth)} classes="btn btn-primary btn-sm">
                                {Page::Auth.title()}
                            </Link<Route>>
                        }
                    }
                }
            </div>
        </nav>
    }
}
