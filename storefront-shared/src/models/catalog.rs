//! Restaurants and the products they sell.

use serde::{Deserialize, Serialize};

/// Format an amount in cents as dollars, e.g. `1250` -> `$12.50`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}

/// A restaurant listed in the storefront.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Restaurant {
    /// Row id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Cuisine label shown on listing cards.
    #[serde(default)]
    pub cuisine: Option<String>,
    /// Account that manages this restaurant from the owner dashboard.
    pub owner_id: String,
}

/// A menu item that can be added to the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    /// Row id.
    pub id: String,
    /// Restaurant selling this product.
    pub restaurant_id: String,
    /// Display name.
    pub name: String,
    /// Optional menu description.
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price in cents.
    pub price_cents: i64,
    /// Whether the restaurant currently accepts orders for it.
    #[serde(default = "default_available")]
    pub available: bool,
}

const fn default_available() -> bool {
    true
}

impl Product {
    /// Formatted unit price.
    pub fn price(&self) -> String {
        format_cents(self.price_cents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, "$0.00")]
    #[test_case(5, "$0.05")]
    #[test_case(1250, "$12.50")]
    #[test_case(-199, "-$1.99")]
    fn test_format_cents(cents: i64, expected: &str) {
        assert_eq!(format_cents(cents), expected);
    }

    #[test]
    fn test_product_defaults_to_available() {
        let json = r#"{"id":"p1","restaurant_id":"r1","name":"Margherita","price_cents":1100}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.available);
        assert_eq!(product.description, None);
        assert_eq!(product.price(), "$11.00");
    }
}
