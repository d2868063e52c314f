//! Order notification client (checkout email mode).

use std::sync::Arc;
use std::time::Duration;

use mars_mayorista_core::Email;
use serde::Serialize;
use tracing::instrument;
use url::Url;

use super::summary::{OrderLine, OrderSummary};
use super::CheckoutError;

/// Request timeout for checkout submission.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// JSON payload accepted by the notification endpoint.
#[derive(Debug, Serialize)]
struct SendOrderRequest<'a> {
    email: &'a str,
    #[serde(rename = "clientName", skip_serializing_if = "Option::is_none")]
    client_name: Option<&'a str>,
    #[serde(rename = "clientPhone", skip_serializing_if = "Option::is_none")]
    client_phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    observations: Option<&'a str>,
    #[serde(rename = "cartItems")]
    cart_items: &'a [OrderLine],
}

/// Client for the order notification endpoint.
///
/// Any 2xx response means the order was accepted and a summary email is on
/// its way to the shopper. Cheaply cloneable.
#[derive(Clone)]
pub struct NotificationClient {
    inner: Arc<NotificationClientInner>,
}

struct NotificationClientInner {
    http: reqwest::Client,
    endpoint: Url,
}

impl NotificationClient {
    /// Create a new notification client.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(endpoint: Url) -> Result<Self, CheckoutError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("mars-mayorista-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(NotificationClientInner { http, endpoint }),
        })
    }

    /// Submit an order summary addressed to the shopper's email.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Http`] - transport failure.
    /// - [`CheckoutError::Rejected`] - non-2xx response; the message carries
    ///   the start of the body for diagnostics.
    #[instrument(skip(self, summary), fields(lines = summary.lines.len()))]
    pub async fn send_order(
        &self,
        email: &Email,
        summary: &OrderSummary,
    ) -> Result<(), CheckoutError> {
        let body = SendOrderRequest {
            email: email.as_str(),
            client_name: summary.customer.name.as_deref(),
            client_phone: summary.customer.phone.as_deref(),
            observations: summary.customer.notes.as_deref(),
            cart_items: &summary.lines,
        };

        let response = self
            .inner
            .http
            .post(self.inner.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = %status,
                message = %message.chars().take(200).collect::<String>(),
                "order notification rejected"
            );
            return Err(CheckoutError::Rejected {
                status: status.as_u16(),
                message: message.chars().take(200).collect(),
            });
        }

        tracing::info!(total = %summary.total, "order notification accepted");
        Ok(())
    }
}
