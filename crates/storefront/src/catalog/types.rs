//! Wire types for the product API.
//!
//! Field names follow the collaborator's JSON (Spanish product fields,
//! camelCase pagination); the serde renames keep our identifiers idiomatic.

use mars_mayorista_core::{Price, ProductId, Sku};
use serde::{Deserialize, Serialize};

/// A product listing as served by the catalog endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub sku: Sku,
    #[serde(rename = "titulo")]
    pub title: String,
    /// Wholesale unit price, served as a decimal string.
    #[serde(rename = "precio_mayorista")]
    pub price: Price,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub stock: u32,
}

/// Pagination envelope returned alongside every catalog page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_items: u64,
    pub has_next_page: bool,
}

/// One page of catalog results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProductPage {
    #[serde(default)]
    pub data: Vec<Product>,
    #[serde(default)]
    pub pagination: Pagination,
}
