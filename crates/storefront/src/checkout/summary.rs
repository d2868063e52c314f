//! Order summary: the read-only projection of a cart for delivery.

use std::fmt::Write as _;

use mars_mayorista_core::{Price, Sku};
use serde::Serialize;

use crate::cart::Cart;

use super::CheckoutError;

/// Customer-entered fields attached to a checkout attempt.
#[derive(Debug, Clone, Default)]
pub struct CustomerDetails {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// One order line, serialized with the notification endpoint's field names.
#[derive(Debug, Clone, Serialize)]
pub struct OrderLine {
    #[serde(rename = "Producto")]
    pub product: String,
    #[serde(rename = "SKU")]
    pub sku: Sku,
    #[serde(rename = "Precio")]
    pub unit_price: Price,
    #[serde(rename = "Cantidad")]
    pub quantity: u32,
    #[serde(rename = "Subtotal")]
    pub subtotal: Price,
}

/// A complete order summary, composed fresh per checkout attempt.
#[derive(Debug, Clone)]
pub struct OrderSummary {
    pub lines: Vec<OrderLine>,
    pub total: Price,
    pub customer: CustomerDetails,
}

impl OrderSummary {
    /// Project the cart into an order summary.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] when there is nothing to order.
    pub fn from_cart(cart: &Cart, customer: CustomerDetails) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let lines = cart
            .items
            .iter()
            .map(|item| OrderLine {
                product: item.title.clone(),
                sku: item.sku.clone(),
                unit_price: item.price,
                quantity: item.quantity,
                subtotal: item.price.times(item.quantity),
            })
            .collect();

        Ok(Self {
            lines,
            total: cart.total(),
            customer,
        })
    }

    /// Total unit count across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Render the summary as the human-readable text sent over messaging.
    #[must_use]
    pub fn message_text(&self) -> String {
        let mut text = String::new();

        match self.customer.name.as_deref() {
            Some(name) => {
                let _ = writeln!(text, "Nuevo pedido de {name}");
            }
            None => text.push_str("Nuevo pedido\n"),
        }
        text.push('\n');

        for line in &self.lines {
            let _ = writeln!(
                text,
                "{} x{} (SKU {}) - {} c/u = {}",
                line.product, line.quantity, line.sku, line.unit_price, line.subtotal
            );
        }

        let _ = write!(text, "\nTotal: {}", self.total);

        if let Some(phone) = self.customer.phone.as_deref() {
            let _ = write!(text, "\nTel: {phone}");
        }
        if let Some(notes) = self.customer.notes.as_deref() {
            let _ = write!(text, "\nNotas: {notes}");
        }

        text
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mars_mayorista_core::ProductId;

    use crate::cart::LineItem;

    use super::*;

    fn cart() -> Cart {
        Cart {
            items: vec![
                LineItem {
                    id: ProductId::new(1),
                    sku: Sku::new("MARS-001"),
                    title: "Pelota saltarina".to_string(),
                    price: Price::new("150.00".parse().unwrap()),
                    quantity: 3,
                    image: None,
                    stock: 10,
                },
                LineItem {
                    id: ProductId::new(2),
                    sku: Sku::new("MARS-002"),
                    title: "Autito de carrera".to_string(),
                    price: Price::new("899.90".parse().unwrap()),
                    quantity: 1,
                    image: None,
                    stock: 4,
                },
            ],
        }
    }

    #[test]
    fn test_from_cart_projects_lines_and_total() {
        let summary = OrderSummary::from_cart(&cart(), CustomerDetails::default()).unwrap();

        assert_eq!(summary.lines.len(), 2);
        let first = summary.lines.first().unwrap();
        assert_eq!(first.product, "Pelota saltarina");
        assert_eq!(first.subtotal, Price::new("450.00".parse().unwrap()));
        assert_eq!(summary.total, Price::new("1349.90".parse().unwrap()));
        assert_eq!(summary.unit_count(), 4);
    }

    #[test]
    fn test_from_cart_rejects_empty_cart() {
        let err = OrderSummary::from_cart(&Cart::new(), CustomerDetails::default()).unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[test]
    fn test_line_serializes_with_collaborator_field_names() {
        let summary = OrderSummary::from_cart(&cart(), CustomerDetails::default()).unwrap();
        let json = serde_json::to_value(summary.lines.first().unwrap()).unwrap();

        assert_eq!(json["Producto"], "Pelota saltarina");
        assert_eq!(json["SKU"], "MARS-001");
        assert_eq!(json["Precio"], "150.00");
        assert_eq!(json["Cantidad"], 3);
        assert_eq!(json["Subtotal"], "450.00");
    }

    #[test]
    fn test_message_text_includes_lines_total_and_customer() {
        let customer = CustomerDetails {
            name: Some("Carla".to_string()),
            phone: Some("1155550000".to_string()),
            notes: Some("Entregar por la tarde".to_string()),
        };
        let summary = OrderSummary::from_cart(&cart(), customer).unwrap();
        let text = summary.message_text();

        assert!(text.starts_with("Nuevo pedido de Carla"));
        assert!(text.contains("Pelota saltarina x3 (SKU MARS-001) - $150.00 c/u = $450.00"));
        assert!(text.contains("Total: $1349.90"));
        assert!(text.contains("Tel: 1155550000"));
        assert!(text.contains("Notas: Entregar por la tarde"));
    }

    #[test]
    fn test_message_text_without_optional_fields() {
        let summary = OrderSummary::from_cart(&cart(), CustomerDetails::default()).unwrap();
        let text = summary.message_text();

        assert!(text.starts_with("Nuevo pedido\n"));
        assert!(!text.contains("Tel:"));
        assert!(!text.contains("Notas:"));
    }
}
