//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//!
//! # Home
//! GET  /api/home                   - New-arrivals + offers feeds
//!
//! # Catalog
//! GET  /api/catalog                - Current feed view
//! PUT  /api/catalog/filters        - Replace filter snapshot (refreshes page 1)
//! POST /api/catalog/load-more      - Guarded next-page append
//! GET  /api/catalog/categories     - Category list (cached)
//!
//! # Cart
//! GET    /api/cart                 - Cart view
//! GET    /api/cart/count           - Cart badge count
//! POST   /api/cart/items           - Add item (merge-or-insert, stock clamp)
//! PATCH  /api/cart/items/{id}      - Set quantity (floor-to-1, stock clamp)
//! DELETE /api/cart/items/{id}      - Remove item
//! DELETE /api/cart                 - Clear cart
//!
//! # Checkout
//! POST /api/checkout/email         - Submit order to the notification endpoint
//! POST /api/checkout/whatsapp      - Compose the messaging deep link
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod home;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::show))
        .route("/filters", put(catalog::apply_filters))
        .route("/load-more", post(catalog::load_more))
        .route("/categories", get(catalog::categories))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/count", get(cart::count))
        .route("/items", post(cart::add))
        .route(
            "/items/{id}",
            delete(cart::remove).patch(cart::set_quantity),
        )
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/email", post(checkout::submit_email))
        .route("/whatsapp", post(checkout::compose_whatsapp))
}

/// Create all API routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/home", get(home::show))
        .nest("/api/catalog", catalog_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/checkout", checkout_routes())
}
