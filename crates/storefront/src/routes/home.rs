//! Home page feed handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::catalog::Product;
use crate::state::AppState;

/// Home page feeds.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub new_arrivals: Vec<Product>,
    pub offers: Vec<Product>,
}

/// Home page feeds (new arrivals + offers).
///
/// Each feed degrades to empty on its own failure; the home page renders
/// whatever sections it got.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<HomeView> {
    let (new_arrivals, offers) =
        tokio::join!(state.catalog().new_arrivals(), state.catalog().offers());

    let new_arrivals = new_arrivals.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to fetch new arrivals");
        Vec::new()
    });
    let offers = offers.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to fetch offers");
        Vec::new()
    });

    Json(HomeView {
        new_arrivals,
        offers,
    })
}
