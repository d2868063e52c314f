//! Messaging deep-link builder (checkout messaging mode).

use super::summary::{CustomerDetails, OrderSummary};
use super::{CheckoutError, MIN_CLIENT_NAME_LEN};

/// Validate the display name for the messaging mode.
///
/// # Errors
///
/// Returns [`CheckoutError::NameTooShort`] when the trimmed name has fewer
/// than [`MIN_CLIENT_NAME_LEN`] characters.
pub fn validate_client_name(name: &str) -> Result<&str, CheckoutError> {
    let name = name.trim();
    if name.chars().count() < MIN_CLIENT_NAME_LEN {
        return Err(CheckoutError::NameTooShort);
    }
    Ok(name)
}

/// Build the pre-addressed deep link carrying the order summary.
///
/// The summary text is URL-encoded into the `text` parameter of the
/// messaging host's `/send` endpoint, addressed to the store's fixed
/// order phone.
#[must_use]
pub fn deep_link(messaging_host: &str, order_phone: &str, summary: &OrderSummary) -> String {
    format!(
        "https://{messaging_host}/send?phone={order_phone}&text={}",
        urlencoding::encode(&summary.message_text())
    )
}

/// Compose the messaging checkout: validate the name, then build the link.
///
/// # Errors
///
/// Returns [`CheckoutError::NameTooShort`] for an invalid display name, or
/// [`CheckoutError::EmptyCart`] when there is nothing to order.
pub fn compose(
    messaging_host: &str,
    order_phone: &str,
    cart: &crate::cart::Cart,
    customer: CustomerDetails,
) -> Result<String, CheckoutError> {
    let name = customer.name.as_deref().unwrap_or_default();
    let name = validate_client_name(name)?.to_string();

    let summary = OrderSummary::from_cart(
        cart,
        CustomerDetails {
            name: Some(name),
            ..customer
        },
    )?;

    Ok(deep_link(messaging_host, order_phone, &summary))
}
