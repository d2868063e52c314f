//! Catalog feed: accumulates fetched pages into the displayed list.
//!
//! The feed owns the interaction-level behavior around the client: debounced
//! text search, last-applied-wins filter refreshes, and guarded infinite
//! scroll. Fetch errors leave the displayed list untouched.
//!
//! # Stale responses
//!
//! Every refresh bumps a monotonically increasing generation and re-checks it
//! after each await. A response that lands after a newer refresh was issued
//! is discarded, so an old filter's page can never overwrite a newer
//! filter's results.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use mars_mayorista_core::ProductId;
use serde::Serialize;
use tokio::sync::Mutex;

use super::client::CatalogClient;
use super::filters::FilterState;
use super::types::Product;
use super::CatalogError;

/// Result of a filter refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The displayed list now reflects the new snapshot's first page.
    Applied,
    /// A newer refresh was issued while this one waited; nothing changed.
    Superseded,
}

/// Result of a `load_more` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMore {
    /// Fresh products were appended.
    Appended { count: usize },
    /// A page fetch is already in flight; no request was issued.
    AlreadyLoading,
    /// No further pages (server signal, or an all-duplicates page).
    EndOfFeed,
    /// The feed was refreshed under us; the page was discarded.
    Superseded,
}

/// A renderable snapshot of the feed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedView {
    pub products: Vec<Product>,
    pub page: u32,
    pub total_items: u64,
    pub has_more: bool,
    pub filters: FilterState,
}

/// Accumulating catalog feed. Cheaply cloneable.
#[derive(Clone)]
pub struct CatalogFeed {
    inner: Arc<FeedInner>,
}

struct FeedInner {
    client: CatalogClient,
    page_size: u32,
    search_debounce: Duration,
    generation: AtomicU64,
    state: Mutex<FeedState>,
}

#[derive(Default)]
struct FeedState {
    filters: FilterState,
    products: Vec<Product>,
    /// Identities already displayed; appended pages dedup against this.
    seen: HashSet<ProductId>,
    /// Last successfully applied page; 0 until the first refresh lands.
    page: u32,
    total_items: u64,
    has_more: bool,
    loading_more: bool,
}

impl CatalogFeed {
    /// Create a feed over the given client.
    #[must_use]
    pub fn new(client: CatalogClient, page_size: u32, search_debounce: Duration) -> Self {
        Self {
            inner: Arc::new(FeedInner {
                client,
                page_size,
                search_debounce,
                generation: AtomicU64::new(0),
                state: Mutex::new(FeedState::default()),
            }),
        }
    }

    /// Replace the filter snapshot and refresh the feed from page 1.
    ///
    /// The snapshot is replaced immediately. When the text query changed,
    /// the fetch waits out the quiescent interval first; a newer refresh
    /// issued meanwhile wins and this one returns
    /// [`RefreshOutcome::Superseded`]. All other filter changes fetch
    /// immediately.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the fetch fails; the displayed list is
    /// left untouched.
    pub async fn apply_filters(
        &self,
        filters: FilterState,
    ) -> Result<RefreshOutcome, CatalogError> {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let text_changed = {
            let mut state = self.inner.state.lock().await;
            let changed = state.filters.search_query != filters.search_query;
            state.filters = filters.clone();
            changed
        };

        if text_changed && !self.inner.search_debounce.is_zero() {
            tokio::time::sleep(self.inner.search_debounce).await;
            if self.inner.generation.load(Ordering::SeqCst) != generation {
                return Ok(RefreshOutcome::Superseded);
            }
        }

        let page = self
            .inner
            .client
            .fetch_page(1, self.inner.page_size, &filters)
            .await?;

        let mut state = self.inner.state.lock().await;
        if self.inner.generation.load(Ordering::SeqCst) != generation {
            // A newer filter's refresh landed first; drop this response.
            return Ok(RefreshOutcome::Superseded);
        }

        state.seen = page.data.iter().map(|p| p.id).collect();
        state.products = page.data;
        state.page = 1;
        state.total_items = page.pagination.total_items;
        state.has_more = page.pagination.has_next_page;
        Ok(RefreshOutcome::Applied)
    }

    /// Fetch and append the next page under the current filter snapshot.
    ///
    /// No-op while a page fetch is already in flight or the feed reached
    /// end-of-data. Appended products are de-duplicated by identity against
    /// everything already displayed; a page yielding nothing fresh forces
    /// end-of-data even if the server still advertises more.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the fetch fails; the displayed list is
    /// left untouched and a later call may retry.
    pub async fn load_more(&self) -> Result<LoadMore, CatalogError> {
        let (filters, next_page, generation) = {
            let mut state = self.inner.state.lock().await;
            if state.loading_more {
                return Ok(LoadMore::AlreadyLoading);
            }
            if !state.has_more {
                return Ok(LoadMore::EndOfFeed);
            }
            state.loading_more = true;
            (
                state.filters.clone(),
                state.page + 1,
                self.inner.generation.load(Ordering::SeqCst),
            )
        };

        let result = self
            .inner
            .client
            .fetch_page(next_page, self.inner.page_size, &filters)
            .await;

        let mut state = self.inner.state.lock().await;
        state.loading_more = false;

        let page = result?;

        if self.inner.generation.load(Ordering::SeqCst) != generation {
            return Ok(LoadMore::Superseded);
        }

        let mut appended = 0usize;
        for product in page.data {
            if state.seen.insert(product.id) {
                state.products.push(product);
                appended += 1;
            }
        }

        if appended == 0 {
            // The upstream feed is repeating itself (or came back empty);
            // stop paging regardless of its hasNextPage signal.
            state.has_more = false;
            return Ok(LoadMore::EndOfFeed);
        }

        state.page = next_page;
        state.total_items = page.pagination.total_items;
        state.has_more = page.pagination.has_next_page;
        Ok(LoadMore::Appended { count: appended })
    }

    /// A renderable snapshot of the current feed state.
    pub async fn view(&self) -> FeedView {
        let state = self.inner.state.lock().await;
        FeedView {
            products: state.products.clone(),
            page: state.page,
            total_items: state.total_items,
            has_more: state.has_more,
            filters: state.filters.clone(),
        }
    }
}
