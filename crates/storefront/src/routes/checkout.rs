//! Checkout route handlers.
//!
//! One request per checkout attempt, one mode per request. The email mode
//! clears the cart only after the notification endpoint accepted the order;
//! the messaging mode just hands back the deep link and leaves the cart to
//! the shopper.

use axum::{Json, extract::State};
use mars_mayorista_core::Email;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::cart::CartAction;
use crate::checkout::{CheckoutError, CustomerDetails, OrderSummary, whatsapp};
use crate::error::Result;
use crate::state::AppState;

/// Email checkout request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailCheckoutRequest {
    pub email: String,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub client_phone: Option<String>,
    #[serde(default)]
    pub observations: Option<String>,
}

/// Messaging checkout request.
#[derive(Debug, Deserialize)]
pub struct WhatsAppCheckoutRequest {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Email checkout response.
#[derive(Debug, Serialize)]
pub struct EmailCheckoutResponse {
    pub status: &'static str,
}

/// Messaging checkout response.
#[derive(Debug, Serialize)]
pub struct WhatsAppCheckoutResponse {
    pub link: String,
}

/// Submit the order to the notification endpoint (email mode).
///
/// On acceptance the cart is cleared; on rejection or transport failure the
/// cart is left untouched and the error is retryable.
#[instrument(skip(state, request))]
pub async fn submit_email(
    State(state): State<AppState>,
    Json(request): Json<EmailCheckoutRequest>,
) -> Result<Json<EmailCheckoutResponse>> {
    let email = Email::parse(&request.email).map_err(CheckoutError::from)?;

    let cart = state.cart().snapshot().await;
    let customer = CustomerDetails {
        name: request.client_name,
        phone: request.client_phone,
        notes: request.observations,
    };
    let summary = OrderSummary::from_cart(&cart, customer)?;

    state.notifier().send_order(&email, &summary).await?;

    // Accepted: the order is on its way, start the next one fresh.
    state.cart().dispatch(CartAction::Clear).await;

    Ok(Json(EmailCheckoutResponse { status: "sent" }))
}

/// Compose the pre-addressed messaging deep link (messaging mode).
///
/// No server round-trip: success is the shopper opening the link, so the
/// cart is not cleared here.
#[instrument(skip(state, request))]
pub async fn compose_whatsapp(
    State(state): State<AppState>,
    Json(request): Json<WhatsAppCheckoutRequest>,
) -> Result<Json<WhatsAppCheckoutResponse>> {
    let cart = state.cart().snapshot().await;
    let customer = CustomerDetails {
        name: Some(request.name),
        phone: request.phone,
        notes: request.notes,
    };

    let link = whatsapp::compose(
        &state.config().messaging_host,
        &state.config().order_phone,
        &cart,
        customer,
    )?;

    Ok(Json(WhatsAppCheckoutResponse { link }))
}
