//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PRODUCT_API_BASE_URL` - Base URL of the remote product API
//!   (e.g., `https://api.marsmayorista.com.ar/api`)
//! - `ORDER_PHONE` - Destination phone number for messaging-app orders,
//!   digits only with country code (e.g., `5491155550000`)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `CHECKOUT_NOTIFY_URL` - Order notification endpoint
//!   (default: `<PRODUCT_API_BASE_URL>/send-cart`)
//! - `MESSAGING_HOST` - Messaging deep-link host (default: api.whatsapp.com)
//! - `CART_STORE_PATH` - Cart persistence file (default: cart.json)
//! - `CATALOG_PAGE_SIZE` - Products per page (default: 12)
//! - `SEARCH_DEBOUNCE_MS` - Text-search quiescent interval (default: 500)
//! - `STOREFRONT_ALLOWED_ORIGIN` - CORS origin for the web UI
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Base URL of the remote product API
    pub product_api_base: Url,
    /// Order notification endpoint (checkout email mode)
    pub notify_url: Url,
    /// Messaging deep-link host (checkout messaging mode)
    pub messaging_host: String,
    /// Fixed destination phone for messaging-app orders
    pub order_phone: String,
    /// Cart persistence file path
    pub cart_store_path: PathBuf,
    /// Products fetched per catalog page
    pub page_size: u32,
    /// Quiescent interval before a text-search fetch is issued
    pub search_debounce: Duration,
    /// CORS origin allowed to call the JSON API
    pub allowed_origin: Option<String>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;

        let product_api_base = get_required_url("PRODUCT_API_BASE_URL")?;
        let notify_url = match get_optional_env("CHECKOUT_NOTIFY_URL") {
            Some(raw) => parse_url("CHECKOUT_NOTIFY_URL", &raw)?,
            None => derive_notify_url(&product_api_base).ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "PRODUCT_API_BASE_URL".to_string(),
                    "cannot derive send-cart endpoint from base URL".to_string(),
                )
            })?,
        };

        let messaging_host = get_env_or_default("MESSAGING_HOST", "api.whatsapp.com");
        let order_phone = get_required_env("ORDER_PHONE")?;
        validate_phone(&order_phone)?;

        let cart_store_path = PathBuf::from(get_env_or_default("CART_STORE_PATH", "cart.json"));
        let page_size = get_env_or_default("CATALOG_PAGE_SIZE", "12")
            .parse::<u32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CATALOG_PAGE_SIZE".to_string(), e.to_string())
            })?;
        let search_debounce = get_env_or_default("SEARCH_DEBOUNCE_MS", "500")
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SEARCH_DEBOUNCE_MS".to_string(), e.to_string())
            })?;

        let allowed_origin = get_optional_env("STOREFRONT_ALLOWED_ORIGIN");
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            product_api_base,
            notify_url,
            messaging_host,
            order_phone,
            cart_store_path,
            page_size,
            search_debounce,
            allowed_origin,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Derive the default order-notification endpoint from the API base URL.
///
/// The collaborator exposes `send-cart` as a sibling of the catalog routes,
/// so `https://host/api` becomes `https://host/api/send-cart`.
fn derive_notify_url(base: &Url) -> Option<Url> {
    let mut url = base.clone();
    {
        let mut segments = url.path_segments_mut().ok()?;
        segments.pop_if_empty().push("send-cart");
    }
    Some(url)
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a required environment variable parsed as a URL.
fn get_required_url(key: &str) -> Result<Url, ConfigError> {
    let raw = get_required_env(key)?;
    parse_url(key, &raw)
}

/// Parse a URL, mapping failures to a `ConfigError` naming the variable.
fn parse_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Validate that a phone number is digits only (country code included).
fn validate_phone(phone: &str) -> Result<(), ConfigError> {
    if phone.is_empty() || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::InvalidEnvVar(
            "ORDER_PHONE".to_string(),
            "must be digits only, including country code".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_notify_url_from_api_base() {
        let base = Url::parse("https://api.marsmayorista.com.ar/api").unwrap();
        let derived = derive_notify_url(&base).unwrap();
        assert_eq!(
            derived.as_str(),
            "https://api.marsmayorista.com.ar/api/send-cart"
        );
    }

    #[test]
    fn test_derive_notify_url_with_trailing_slash() {
        let base = Url::parse("http://192.168.1.132:4000/api/").unwrap();
        let derived = derive_notify_url(&base).unwrap();
        assert_eq!(derived.as_str(), "http://192.168.1.132:4000/api/send-cart");
    }

    #[test]
    fn test_validate_phone_accepts_digits() {
        assert!(validate_phone("5491155550000").is_ok());
    }

    #[test]
    fn test_validate_phone_rejects_formatting() {
        assert!(validate_phone("+54 9 11 5555-0000").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_parse_url_invalid() {
        let err = parse_url("PRODUCT_API_BASE_URL", "not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            product_api_base: Url::parse("http://localhost:4000/api").unwrap(),
            notify_url: Url::parse("http://localhost:4000/api/send-cart").unwrap(),
            messaging_host: "api.whatsapp.com".to_string(),
            order_phone: "5491155550000".to_string(),
            cart_store_path: PathBuf::from("cart.json"),
            page_size: 12,
            search_debounce: Duration::from_millis(500),
            allowed_origin: None,
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
