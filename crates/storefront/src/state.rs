//! Application state shared across handlers.

use std::sync::Arc;

use thiserror::Error;

use crate::cart::{CartService, CartStore};
use crate::catalog::{CatalogClient, CatalogError, CatalogFeed};
use crate::checkout::{CheckoutError, NotificationClient};
use crate::config::StorefrontConfig;

/// Error building the application state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("catalog client: {0}")]
    Catalog(#[from] CatalogError),
    #[error("notification client: {0}")]
    Checkout(#[from] CheckoutError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources: the product API clients, the cart service, and
/// configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    feed: CatalogFeed,
    cart: CartService,
    notifier: NotificationClient,
}

impl AppState {
    /// Create a new application state, restoring the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be constructed.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let catalog = CatalogClient::new(config.product_api_base.clone())?;
        let feed = CatalogFeed::new(catalog.clone(), config.page_size, config.search_debounce);
        let cart = CartService::open(CartStore::new(config.cart_store_path.clone()));
        let notifier = NotificationClient::new(config.notify_url.clone())?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                feed,
                cart,
                notifier,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the catalog feed.
    #[must_use]
    pub fn feed(&self) -> &CatalogFeed {
        &self.inner.feed
    }

    /// Get a reference to the cart service.
    #[must_use]
    pub fn cart(&self) -> &CartService {
        &self.inner.cart
    }

    /// Get a reference to the order notification client.
    #[must_use]
    pub fn notifier(&self) -> &NotificationClient {
        &self.inner.notifier
    }
}
