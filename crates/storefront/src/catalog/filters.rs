//! Catalog filter state and its query-string encoding.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sort keys understood by the product API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
}

impl SortKey {
    /// The collaborator's query-parameter value.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
        }
    }
}

/// Default upper bound of the price slider.
fn default_max_price() -> Decimal {
    Decimal::from(150_000)
}

/// One immutable snapshot of the catalog filters.
///
/// Consumers never mutate a snapshot in place; every change replaces the
/// whole value. Category is single-select even though the UI renders it in
/// a list control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub search_query: String,
    pub category: Option<String>,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub product_types: Vec<String>,
    pub sort_by: Option<SortKey>,
    pub hide_out_of_stock: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            category: None,
            min_price: Decimal::ZERO,
            max_price: default_max_price(),
            product_types: Vec::new(),
            sort_by: None,
            hide_out_of_stock: false,
        }
    }
}

impl FilterState {
    /// Encode this snapshot as query parameters for one catalog page.
    ///
    /// Empty text, absent category/sort, and an empty type set are omitted;
    /// the price range is always sent.
    #[must_use]
    pub fn query_params(&self, page: u32, limit: u32) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), page.to_string()),
            ("limit".to_string(), limit.to_string()),
        ];

        let search = self.search_query.trim();
        if !search.is_empty() {
            params.push(("search".to_string(), search.to_string()));
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            params.push(("category".to_string(), category.to_string()));
        }
        if let Some(sort) = self.sort_by {
            params.push(("sortBy".to_string(), sort.as_param().to_string()));
        }

        params.push(("min_price".to_string(), self.min_price.to_string()));
        params.push(("max_price".to_string(), self.max_price.to_string()));

        if !self.product_types.is_empty() {
            params.push(("productTypes".to_string(), self.product_types.join(",")));
        }
        if self.hide_out_of_stock {
            params.push(("hideOutOfStock".to_string(), "true".to_string()));
        }

        params
    }
}
