//! Catalog route handlers.
//!
//! The feed holds the accumulated product list server-side; the UI replaces
//! the filter snapshot wholesale and asks for more pages as the shopper
//! scrolls. Fetch failures surface as retryable errors without clearing
//! what is already displayed.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::catalog::{FeedView, FilterState, LoadMore, RefreshOutcome};
use crate::error::Result;
use crate::state::AppState;

/// Feed response with the outcome of the triggering operation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appended: Option<usize>,
    #[serde(flatten)]
    pub view: FeedView,
}

/// Current feed view.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<FeedView> {
    Json(state.feed().view().await)
}

/// Replace the filter snapshot and refresh from page 1.
///
/// Text-query changes wait out the configured quiescent interval; a newer
/// snapshot issued meanwhile wins and this call reports `superseded`.
#[instrument(skip(state, filters))]
pub async fn apply_filters(
    State(state): State<AppState>,
    Json(filters): Json<FilterState>,
) -> Result<Json<FeedResponse>> {
    let outcome = match state.feed().apply_filters(filters).await? {
        RefreshOutcome::Applied => "applied",
        RefreshOutcome::Superseded => "superseded",
    };

    Ok(Json(FeedResponse {
        outcome,
        appended: None,
        view: state.feed().view().await,
    }))
}

/// Append the next page (no-op while one is already loading or at the end).
#[instrument(skip(state))]
pub async fn load_more(State(state): State<AppState>) -> Result<Json<FeedResponse>> {
    let (outcome, appended) = match state.feed().load_more().await? {
        LoadMore::Appended { count } => ("appended", Some(count)),
        LoadMore::AlreadyLoading => ("already-loading", None),
        LoadMore::EndOfFeed => ("end-of-feed", None),
        LoadMore::Superseded => ("superseded", None),
    };

    Ok(Json(FeedResponse {
        outcome,
        appended,
        view: state.feed().view().await,
    }))
}

/// Category list for the filter sidebar.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(state.catalog().categories().await?))
}
