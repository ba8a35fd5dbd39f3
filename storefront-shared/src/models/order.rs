use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use super::Timestamp;
use super::catalog::format_cents;

/// Lifecycle of a placed order, declared in progression order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Canonical string stored in the `status` column.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Label shown to customers.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Preparing => "Preparing",
            Self::OutForDelivery => "Out for delivery",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Delivered and cancelled orders never change again.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Status an owner moves the order to next, if any.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Preparing),
            Self::Preparing => Some(Self::OutForDelivery),
            Self::OutForDelivery => Some(Self::Delivered),
            Self::Delivered | Self::Cancelled => None,
        }
    }
}

/// One line of a placed order, snapshotted at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
}

impl OrderItem {
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * i64::from(self.quantity)
    }
}

/// An order as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub restaurant_id: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub total_cents: i64,
    #[serde(default)]
    pub delivery_address: Option<String>,
    pub created_at: Timestamp,
}

impl Order {
    /// Formatted order total.
    pub fn total(&self) -> String {
        format_cents(self.total_cents)
    }

    /// Sum of item quantities.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

/// Insert payload produced by checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: String,
    pub restaurant_id: String,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub total_cents: i64,
    pub delivery_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_status_string_forms_agree() {
        for status in OrderStatus::iter() {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            assert_eq!(status.to_string(), status.as_str());
            assert_eq!(OrderStatus::from_str(status.as_str()).unwrap(), status);
        }
        assert_eq!(OrderStatus::OutForDelivery.as_str(), "out_for_delivery");
    }

    #[test]
    fn test_status_progression_ends_at_delivered() {
        let mut status = OrderStatus::Pending;
        let mut steps = 0;
        while let Some(next) = status.next() {
            status = next;
            steps += 1;
        }
        assert_eq!(status, OrderStatus::Delivered);
        assert_eq!(steps, 3);
        assert!(status.is_terminal());
        assert_eq!(OrderStatus::Cancelled.next(), None);
    }

    #[test]
    fn test_order_totals() {
        let order: Order = serde_json::from_str(
            r#"{
                "id": "o1",
                "user_id": "u1",
                "restaurant_id": "r1",
                "status": "preparing",
                "items": [
                    {"product_id": "p1", "name": "Ramen", "quantity": 2, "unit_price_cents": 1300},
                    {"product_id": "p2", "name": "Gyoza", "quantity": 1, "unit_price_cents": 600}
                ],
                "total_cents": 3200,
                "created_at": "2024-05-01T12:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.total(), "$32.00");
        assert_eq!(order.items[0].line_total_cents(), 2600);
        assert_eq!(order.delivery_address, None);
    }
}
