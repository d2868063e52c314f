//! Stock-keeping reference type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A stock-keeping unit reference.
///
/// SKUs come from the product API verbatim and are treated as opaque;
/// the storefront never derives meaning from their structure (the image
/// service keys product photos by SKU, but that mapping lives upstream).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    /// Create a SKU from any string-like value.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the SKU as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Sku {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for Sku {
    fn from(s: String) -> Self {
        Self(s)
    }
}
