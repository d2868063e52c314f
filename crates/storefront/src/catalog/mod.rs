//! Catalog query client for the remote product API.
//!
//! # Architecture
//!
//! Search, filtering, and pagination are entirely server-side on the product
//! API; this module only builds query parameters, fetches pages, and
//! accumulates them into a displayable feed:
//!
//! - [`filters`] - immutable-per-snapshot filter state and its wire encoding
//! - [`client`] - reqwest client for the paginated catalog, category list
//!   (cached via `moka`), and the home-page feeds
//! - [`feed`] - page accumulation: dedup by identity, debounced text search,
//!   stale-response generation guard, in-flight-guarded `load_more`
//!
//! Fetch errors never clear what is already displayed; the feed keeps its
//! last good state and the caller surfaces a retryable message.

pub mod client;
pub mod feed;
pub mod filters;
mod types;

pub use client::CatalogClient;
pub use feed::{CatalogFeed, FeedView, LoadMore, RefreshOutcome};
pub use filters::{FilterState, SortKey};
pub use types::{Pagination, Product, ProductPage};

use thiserror::Error;

/// Errors that can occur when querying the product API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Collaborator returned a non-success status.
    #[error("product API returned {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// Response body did not match the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
