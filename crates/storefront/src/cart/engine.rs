//! Cart mutation engine: pure state transitions.
//!
//! Every cart change in the storefront flows through [`reduce`]. Quantities
//! are clamped into `[1, stock]` by substitution, never rejected: a request
//! for more units than the stock snapshot allows silently stores the stock
//! amount instead.

use mars_mayorista_core::ProductId;

use super::{Cart, LineItem};

/// A cart state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Replace the collection wholesale. Used only at restore.
    Initialize(Vec<LineItem>),
    /// Merge-or-insert: `item.quantity` carries the *requested* quantity.
    Add { item: LineItem },
    /// Drop the matching line; no-op if absent.
    Remove(ProductId),
    /// Set the matching line's quantity (clamped); no-op if absent.
    SetQuantity { id: ProductId, quantity: u32 },
    /// Empty the collection.
    Clear,
}

/// Apply one action to the cart, returning the next state.
///
/// Invariants upheld:
/// - at most one line per product identity
/// - every stored quantity is in `[1, stock]`
/// - insertion order is preserved on append, untouched on update
#[must_use]
pub fn reduce(mut cart: Cart, action: CartAction) -> Cart {
    match action {
        CartAction::Initialize(items) => {
            cart.items = items;
        }
        CartAction::Add { item } => add_item(&mut cart, item),
        CartAction::Remove(id) => {
            cart.items.retain(|line| line.id != id);
        }
        CartAction::SetQuantity { id, quantity } => {
            if let Some(line) = cart.items.iter_mut().find(|line| line.id == id) {
                line.quantity = quantity.max(1).min(line.stock);
            }
        }
        CartAction::Clear => {
            cart.items.clear();
        }
    }
    cart
}

fn add_item(cart: &mut Cart, item: LineItem) {
    if let Some(line) = cart.items.iter_mut().find(|line| line.id == item.id) {
        // Merge by identity: accumulate, clamp to the stored stock snapshot.
        line.quantity = line.quantity.saturating_add(item.quantity).min(line.stock);
        return;
    }

    // A listing with no available stock never becomes a line.
    if item.stock == 0 {
        return;
    }

    let quantity = item.quantity.max(1).min(item.stock);
    cart.items.push(LineItem { quantity, ..item });
}

/// Coerce raw quantity input to a usable value.
///
/// The quantity field arrives from the UI as whatever the number input held:
/// a number, a numeric string, or garbage from a cleared field. Missing,
/// non-numeric, and non-positive input all floor to 1; clamping to stock
/// happens in [`reduce`].
#[must_use]
pub fn coerce_quantity(raw: Option<&serde_json::Value>) -> u32 {
    let parsed = match raw {
        Some(serde_json::Value::Number(n)) => n.as_i64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    match parsed {
        Some(n) if n >= 1 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => 1,
    }
}
