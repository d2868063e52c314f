//! Cart service: single-writer dispatch with write-through persistence.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::engine::{CartAction, reduce};
use super::store::CartStore;
use super::Cart;

/// Owns the live cart and its durable store.
///
/// All mutation goes through [`dispatch`](Self::dispatch), which applies the
/// reducer under a mutex (single-writer by construction) and write-through
/// persists the result. Cheaply cloneable.
#[derive(Clone)]
pub struct CartService {
    inner: Arc<CartServiceInner>,
}

struct CartServiceInner {
    store: CartStore,
    cart: Mutex<Cart>,
}

impl CartService {
    /// Open the service, restoring the persisted cart.
    ///
    /// A missing or corrupt store restores as empty (see [`CartStore`]).
    #[must_use]
    pub fn open(store: CartStore) -> Self {
        let restored = reduce(Cart::new(), CartAction::Initialize(store.load()));
        if !restored.is_empty() {
            tracing::info!(lines = restored.items.len(), "cart restored from store");
        }

        Self {
            inner: Arc::new(CartServiceInner {
                store,
                cart: Mutex::new(restored),
            }),
        }
    }

    /// Apply one action and persist the result, returning the new state.
    ///
    /// Persistence failures are logged and swallowed: the in-memory cart has
    /// already transitioned, and the shopper keeps an interactive session. A
    /// write that keeps failing costs at most the cart of one deployment
    /// restart.
    pub async fn dispatch(&self, action: CartAction) -> Cart {
        let mut cart = self.inner.cart.lock().await;
        *cart = reduce(std::mem::take(&mut *cart), action);

        if let Err(e) = self.inner.store.save(&cart.items) {
            tracing::error!(error = %e, "failed to persist cart");
        }

        cart.clone()
    }

    /// A point-in-time copy of the cart.
    pub async fn snapshot(&self) -> Cart {
        self.inner.cart.lock().await.clone()
    }
}
