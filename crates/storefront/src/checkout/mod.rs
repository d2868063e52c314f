//! Checkout composition: order summaries and their delivery channels.
//!
//! Two mutually exclusive modes per attempt:
//!
//! - [`notify`] - POST the order summary to the notification endpoint,
//!   addressed by the shopper's email. Success clears the cart; failure is
//!   inline and retryable with the cart untouched.
//! - [`whatsapp`] - render the summary as text and hand back a pre-addressed
//!   messaging deep link. No round-trip; success is opening the link.
//!
//! The [`flow`] module tracks the three-state checkout flow; [`summary`]
//! builds the read-only cart projection both channels share. Summaries are
//! composed fresh per attempt and never persisted.

pub mod flow;
pub mod notify;
pub mod summary;
pub mod whatsapp;

pub use flow::{CheckoutFlow, CheckoutMode, CheckoutStage};
pub use notify::NotificationClient;
pub use summary::{CustomerDetails, OrderLine, OrderSummary};

use mars_mayorista_core::EmailError;
use thiserror::Error;

/// Minimum display-name length (after trimming) for the messaging mode.
pub const MIN_CLIENT_NAME_LEN: usize = 2;

/// Errors that can occur when composing or delivering a checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Shopper email failed the plausibility check.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Display name missing or too short for the messaging mode.
    #[error("client name must be at least {MIN_CLIENT_NAME_LEN} characters")]
    NameTooShort,

    /// Checkout was attempted on an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// HTTP request to the notification endpoint failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Notification endpoint refused the order.
    #[error("order notification rejected: {status} - {message}")]
    Rejected { status: u16, message: String },
}
