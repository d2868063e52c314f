//! Shopping cart subsystem.
//!
//! # Architecture
//!
//! All cart state lives behind a single reducer entry point:
//!
//! - [`engine`] - pure state transitions `(Cart, CartAction) -> Cart`
//! - [`store`] - durable single-document JSON persistence
//! - [`service`] - mutex-guarded dispatch with write-through persistence
//!
//! Quantities are clamped into `[1, stock]` at the moment of write rather
//! than rejected; stock figures are advisory snapshots from the last catalog
//! fetch, not transactional reservations.

pub mod engine;
pub mod service;
pub mod store;

pub use engine::{CartAction, coerce_quantity, reduce};
pub use service::CartService;
pub use store::{CartStore, CartStoreError};

use mars_mayorista_core::{Price, ProductId, Sku};
use serde::{Deserialize, Serialize};

/// One product entry in the cart with its chosen quantity.
///
/// Product fields are a snapshot of the listing at the moment the line was
/// added; `stock` is the last-known availability and caps the quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub sku: Sku,
    pub title: String,
    pub price: Price,
    pub quantity: u32,
    pub image: Option<String>,
    pub stock: u32,
}

/// The cart: an ordered collection of line items.
///
/// Insertion order is preserved on append and never changed by updates.
/// Mutated only through [`engine::reduce`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Derived total: sum of unit price times quantity over all items.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items
            .iter()
            .map(|item| item.price.times(item.quantity))
            .sum()
    }

    /// Total unit count across all lines (the cart badge number).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Look up a line by product identity.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: i64, price: &str, quantity: u32) -> LineItem {
        LineItem {
            id: ProductId::new(id),
            sku: Sku::new(format!("SKU-{id}")),
            title: format!("Product {id}"),
            price: Price::new(price.parse().unwrap()),
            quantity,
            image: None,
            stock: 10,
        }
    }

    #[test]
    fn test_total_sums_price_times_quantity() {
        let cart = Cart {
            items: vec![item(1, "10.00", 2), item(2, "5.50", 3)],
        };
        assert_eq!(cart.total(), Price::new("36.50".parse().unwrap()));
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        assert_eq!(Cart::new().total(), Price::zero());
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let cart = Cart {
            items: vec![item(1, "1.00", 2), item(2, "1.00", 5)],
        };
        assert_eq!(cart.item_count(), 7);
    }
}
