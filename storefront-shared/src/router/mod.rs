//! # View Router
//!
//! Holds the current page, the cart and the selected order, and keeps them
//! consistent with the session through the rules in [`rules`].

pub mod page;
pub mod rules;
pub mod screen;


pub use page::Page;
pub use rules::{Decision, Outcome, RouteFacts, Rule, decide};
pub use screen::{Screen, ScreenDecision, resolve_screen};

use tracing::{debug, error, info, warn};

use crate::auth::AuthProvider;
use crate::client::BackendResult;
use crate::models::{Cart, Order, Product, UserRecord, display_name};
use crate::session::Session;

/// Upper bound on rule passes per action. Every rule moves the state
/// closer to a fixed point, so this is never reached in practice.
const MAX_SETTLE_PASSES: usize = 8;

/// Everything that can change the router's state.
#[derive(Debug, Clone, PartialEq)]
pub enum RouterAction {
    /// The session observer published a new signal.
    SessionChanged(Session),
    Navigate(Page),
    /// The auth screen completed a sign-in or sign-up.
    Authenticated,
    /// Open the tracking page for an order.
    TrackOrder(Order),
    AddToCart(Product),
    SetQuantity { product_id: String, quantity: u32 },
    RemoveFromCart(String),
    ClearCart,
    /// Checkout placed the order for one restaurant; its lines leave the cart.
    OrderPlaced { restaurant_id: String },
    /// Checkout placed every order in the cart.
    CheckoutCompleted,
    /// The provider confirmed sign-out.
    SignedOut,
}

/// The storefront's view state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewRouter {
    session: Session,
    page: Page,
    cart: Cart,
    selected_order: Option<Order>,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start on `page`, e.g. the one named in the URL fragment.
    pub fn with_page(page: Page) -> Self {
        let mut router = Self {
            page,
            ..Self::default()
        };
        router.settle();
        router
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub fn user(&self) -> Option<&UserRecord> {
        self.session.user.as_ref()
    }

    pub const fn page(&self) -> Page {
        self.page
    }

    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    pub const fn selected_order(&self) -> Option<&Order> {
        self.selected_order.as_ref()
    }

    /// Sum of cart quantities.
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    pub fn display_name(&self) -> String {
        display_name(self.user())
    }

    pub fn facts(&self) -> RouteFacts {
        RouteFacts {
            ready: self.session.ready,
            signed_in: self.session.is_authenticated(),
            page: self.page,
            has_selection: self.selected_order.is_some(),
        }
    }

    pub fn screen(&self) -> ScreenDecision {
        resolve_screen(self)
    }

    /// Apply `action`, then run the rules until nothing changes.
    pub fn apply(&mut self, action: RouterAction) {
        match action {
            RouterAction::SessionChanged(session) => self.session = session,
            RouterAction::Navigate(page) => self.page = page,
            RouterAction::Authenticated => self.page = Page::Products,
            RouterAction::TrackOrder(order) => {
                self.selected_order = Some(order);
                self.page = Page::Details;
            }
            RouterAction::AddToCart(product) => self.cart.add(product),
            RouterAction::SetQuantity {
                product_id,
                quantity,
            } => {
                self.cart.set_quantity(&product_id, quantity);
            }
            RouterAction::RemoveFromCart(product_id) => {
                self.cart.remove(&product_id);
            }
            RouterAction::ClearCart => self.cart.clear(),
            RouterAction::OrderPlaced { restaurant_id } => {
                self.cart.remove_restaurant(&restaurant_id);
            }
            RouterAction::CheckoutCompleted => {
                self.cart.clear();
                self.page = Page::History;
            }
            RouterAction::SignedOut => {
                // The provider has confirmed it, so don't wait for the
                // listener before dropping the user.
                self.session.user = None;
                self.cart.clear();
                self.page = Page::Auth;
            }
        }
        self.settle();
    }

    /// Consuming form of [`ViewRouter::apply`].
    #[must_use]
    pub fn reduce(mut self, action: RouterAction) -> Self {
        self.apply(action);
        self
    }

    fn settle(&mut self) {
        for _ in 0..MAX_SETTLE_PASSES {
            let decision = decide(&self.facts());
            if decision.is_stable() {
                return;
            }
            if let Some(page) = decision.redirect {
                debug!(from = %self.page, to = %page, "redirect");
                self.page = page;
            }
            if decision.clear_selection {
                self.selected_order = None;
            }
        }
        warn!(page = %self.page, "router did not settle");
    }
}

/// Sign out through `provider`.
///
/// On success returns the action that clears the cart and shows the auth
/// screen. On failure the error is logged and returned; the caller leaves
/// its state as it was.
///
/// # Errors
/// Propagates the provider's error.
pub async fn sign_out(provider: &dyn AuthProvider) -> BackendResult<RouterAction> {
    match provider.sign_out().await {
        Ok(()) => {
            info!("sign-out complete");
            Ok(RouterAction::SignedOut)
        }
        Err(err) => {
            error!(error = %err, "sign-out failed");
            Err(err)
        }
    }
}
