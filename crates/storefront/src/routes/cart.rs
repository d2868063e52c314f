//! Cart route handlers.
//!
//! Every mutation dispatches one action through the cart reducer and
//! returns the resulting view; persistence is write-through behind the
//! service, so handlers never touch the store directly.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use mars_mayorista_core::ProductId;

use crate::cart::{Cart, CartAction, LineItem, coerce_quantity};
use crate::catalog::Product;
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub id: ProductId,
    pub sku: String,
    pub title: String,
    pub quantity: u32,
    pub stock: u32,
    pub price: String,
    pub line_price: String,
    pub image: Option<String>,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl From<&LineItem> for CartItemView {
    fn from(line: &LineItem) -> Self {
        Self {
            id: line.id,
            sku: line.sku.to_string(),
            title: line.title.clone(),
            quantity: line.quantity,
            stock: line.stock,
            price: line.price.to_string(),
            line_price: line.price.times(line.quantity).to_string(),
            image: line.image.clone(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items.iter().map(CartItemView::from).collect(),
            total: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

/// Add to cart request: the product as listed, plus the requested quantity.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: Option<u32>,
}

/// Set quantity request.
///
/// `quantity` is taken as raw JSON on purpose: the UI's number input can
/// hand over a number, a numeric string, or nothing at all. Coercion floors
/// anything unusable to 1 (see [`coerce_quantity`]).
#[derive(Debug, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: Option<serde_json::Value>,
}

/// Cart badge count.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u32,
}

/// Display the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    let cart = state.cart().snapshot().await;
    Json(CartView::from(&cart))
}

/// Cart badge count.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CartCount> {
    let cart = state.cart().snapshot().await;
    Json(CartCount {
        count: cart.item_count(),
    })
}

/// Add an item (merge-or-insert with stock clamp).
#[instrument(skip(state, request), fields(product_id = %request.product.id))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddToCartRequest>,
) -> Json<CartView> {
    let product = request.product;
    let item = LineItem {
        id: product.id,
        sku: product.sku,
        title: product.title,
        price: product.price,
        quantity: request.quantity.unwrap_or(1),
        image: product.image,
        stock: product.stock,
    };

    let cart = state.cart().dispatch(CartAction::Add { item }).await;
    Json(CartView::from(&cart))
}

/// Set a line's quantity (floor-to-1, clamped to stock; no-op if absent).
#[instrument(skip(state, request))]
pub async fn set_quantity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<SetQuantityRequest>,
) -> Json<CartView> {
    let quantity = coerce_quantity(request.quantity.as_ref());
    let cart = state
        .cart()
        .dispatch(CartAction::SetQuantity {
            id: ProductId::new(id),
            quantity,
        })
        .await;
    Json(CartView::from(&cart))
}

/// Remove a line (no-op if absent).
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> Json<CartView> {
    let cart = state
        .cart()
        .dispatch(CartAction::Remove(ProductId::new(id)))
        .await;
    Json(CartView::from(&cart))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartView> {
    let cart = state.cart().dispatch(CartAction::Clear).await;
    Json(CartView::from(&cart))
}
