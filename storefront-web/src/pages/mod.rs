mod auth;
mod cart;
mod checkout;
mod details;
mod history;
mod owner_dashboard;
mod products;

pub use auth::AuthPage;
pub use cart::CartPage;
pub use checkout::CheckoutPage;
pub use details::OrderDetailsPage;
pub use history::HistoryPage;
pub use owner_dashboard::OwnerDashboardPage;
pub use products::ProductsPage;
