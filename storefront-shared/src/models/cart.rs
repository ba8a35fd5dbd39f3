//! Shopping cart held in memory by the view router.
//!
//! The cart is transient UI state: nothing here talks to the backend until
//! checkout turns it into [`NewOrder`] payloads.

use serde::{Deserialize, Serialize};

use super::catalog::{Product, format_cents};
use super::order::{NewOrder, OrderItem, OrderStatus};

/// A product and how many of it the customer wants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total_cents(&self) -> i64 {
        self.product.price_cents * i64::from(self.quantity)
    }
}

/// Ordered sequence of cart lines, at most one line per product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of items, i.e. the sum of line quantities.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn subtotal_cents(&self) -> i64 {
        self.lines.iter().map(CartLine::line_total_cents).sum()
    }

    pub fn subtotal(&self) -> String {
        format_cents(self.subtotal_cents())
    }

    /// Add one unit of `product`, bumping the existing line if present.
    pub fn add(&mut self, product: Product) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine {
                product,
                quantity: 1,
            });
        }
    }

    /// Set the quantity of a line. Zero removes it. Returns whether the
    /// product was in the cart.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(product_id);
        }
        match self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product_id)
        {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove a product's line. Returns whether anything was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product.id != product_id);
        self.lines.len() != before
    }

    /// Drop every line sold by `restaurant_id`. Returns how many lines went.
    pub fn remove_restaurant(&mut self, restaurant_id: &str) -> usize {
        let before = self.lines.len();
        self.lines
            .retain(|line| line.product.restaurant_id != restaurant_id);
        before - self.lines.len()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Build one order per restaurant, in the order restaurants first appear
    /// in the cart.
    pub fn to_new_orders(&self, user_id: &str, delivery_address: Option<&str>) -> Vec<NewOrder> {
        let mut orders: Vec<NewOrder> = Vec::new();
        for line in &self.lines {
            let item = OrderItem {
                product_id: line.product.id.clone(),
                name: line.product.name.clone(),
                quantity: line.quantity,
                unit_price_cents: line.product.price_cents,
            };
            let total = line.line_total_cents();
            match orders
                .iter_mut()
                .find(|order| order.restaurant_id == line.product.restaurant_id)
            {
                Some(order) => {
                    order.total_cents += total;
                    order.items.push(item);
                }
                None => orders.push(NewOrder {
                    user_id: user_id.to_string(),
                    restaurant_id: line.product.restaurant_id.clone(),
                    status: OrderStatus::Pending,
                    items: vec![item],
                    total_cents: total,
                    delivery_address: delivery_address.map(str::to_string),
                }),
            }
        }
        orders
    }
}

impl FromIterator<CartLine> for Cart {
    fn from_iter<I: IntoIterator<Item = CartLine>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}
