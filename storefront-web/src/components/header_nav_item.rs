use shared::router::Page;
use yew::{Html, Properties, classes, function_component, html};
use yew_router::prelude::Link;

use crate::routes::Route;

#[derive(Properties, PartialEq, Eq)]
pub struct HeaderNavItemProps {
    pub page: Page,
    pub current_page: Page,
    /// Shown as a badge after the title when non-zero.
    #[prop_or_default]
    pub count: u32,
}

#[function_component(HeaderNavItem)]
pub fn header_nav_item(props: &HeaderNavItemProps) -> Html {
    let active_class = (props.page == props.current_page).then_some("btn-soft");

    html! {
      <li>
          <Link<Route> to={Route::from(props.page)} classes={classes!("btn", "btn-ghost", "gap-2", active_class)}>
              {props.page.title()}
              if props.count > 0 {
                  <span class="badge badge-primary badge-sm">{props.count.to_string()}</span>
              }
          </Link<Route>>
      </li>
    }
}
