use super::{Page, ViewRouter};
use crate::models::Order;

/// What the client should draw this cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    OwnerDashboard,
    Auth,
    Products,
    Cart,
    Checkout,
    History,
    Details(Order),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenDecision {
    Render(Screen),
    /// Render nothing and navigate to the page instead.
    Redirect(Page),
}

/// Pure mapping from router state to the screen to draw.
pub fn resolve_screen(router: &ViewRouter) -> ScreenDecision {
    let session = router.session();
    if !session.ready {
        return ScreenDecision::Render(Screen::Loading);
    }
    if router.page() == Page::OwnerDashboard {
        return ScreenDecision::Render(Screen::OwnerDashboard);
    }
    if !session.is_authenticated() {
        return ScreenDecision::Render(Screen::Auth);
    }

    let screen = match router.page() {
        Page::Cart => Screen::Cart,
        Page::Checkout if router.cart().is_empty() => {
            return ScreenDecision::Redirect(Page::Products);
        }
        Page::Checkout => Screen::Checkout,
        Page::History => Screen::History,
        Page::Details => match router.selected_order() {
            Some(order) => Screen::Details(order.clone()),
            None => return ScreenDecision::Redirect(Page::History),
        },
        Page::Products | Page::Auth | Page::OwnerDashboard => Screen::Products,
    };
    ScreenDecision::Render(screen)
}
