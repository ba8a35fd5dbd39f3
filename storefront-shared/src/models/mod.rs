pub mod cart;
pub mod catalog;
pub mod errors;
pub mod order;
pub mod timestamp;
pub mod user;

pub use cart::{Cart, CartLine};
pub use catalog::{Product, Restaurant, format_cents};
pub use errors::ErrorResponse;
pub use order::{NewOrder, Order, OrderItem, OrderStatus};
pub use timestamp::Timestamp;
pub use user::{UserRecord, display_name};
