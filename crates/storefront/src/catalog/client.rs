//! Product API client implementation.
//!
//! Plain REST over `reqwest`; the category list is cached with `moka`
//! (5-minute TTL) since it changes at most a few times a day upstream.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::filters::FilterState;
use super::types::{Product, ProductPage};
use super::CatalogError;

/// Request timeout for catalog fetches.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Category cache TTL.
const CATEGORY_TTL: Duration = Duration::from_secs(300); // 5 minutes

const CATEGORIES_KEY: &str = "categories";

/// Client for the remote product API.
///
/// Provides the paginated catalog, the category list, and the home-page
/// feeds. Cheaply cloneable.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    http: reqwest::Client,
    base: Url,
    categories: Cache<&'static str, Arc<Vec<String>>>,
}

impl CatalogClient {
    /// Create a new product API client.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(base: Url) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("mars-mayorista-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let categories = Cache::builder()
            .max_capacity(1)
            .time_to_live(CATEGORY_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                http,
                base,
                categories,
            }),
        })
    }

    /// Fetch one catalog page for the given filter snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on transport failure, a non-success status,
    /// or an unparseable body.
    pub async fn fetch_page(
        &self,
        page: u32,
        limit: u32,
        filters: &FilterState,
    ) -> Result<ProductPage, CatalogError> {
        let url = self.endpoint(&["productos", "paginated"]);
        debug!(%url, page, "fetching catalog page");
        self.get_json(url, &filters.query_params(page, limit)).await
    }

    /// Fetch the category name list (cached).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the list is not cached and the fetch fails.
    pub async fn categories(&self) -> Result<Vec<String>, CatalogError> {
        if let Some(cached) = self.inner.categories.get(CATEGORIES_KEY).await {
            return Ok((*cached).clone());
        }

        let categories: Vec<String> = self.get_json(self.endpoint(&["categorias"]), &[]).await?;
        self.inner
            .categories
            .insert(CATEGORIES_KEY, Arc::new(categories.clone()))
            .await;
        Ok(categories)
    }

    /// Fetch the new-arrivals feed for the home page.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on transport, status, or parse failure.
    pub async fn new_arrivals(&self) -> Result<Vec<Product>, CatalogError> {
        self.get_json(self.endpoint(&["novedades"]), &[]).await
    }

    /// Fetch the offers feed for the home page.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on transport, status, or parse failure.
    pub async fn offers(&self) -> Result<Vec<Product>, CatalogError> {
        self.get_json(self.endpoint(&["ofertas"]), &[]).await
    }

    /// Build an endpoint URL under the configured API base.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET a JSON resource with typed status and parse errors.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(String, String)],
    ) -> Result<T, CatalogError> {
        let mut request = self.inner.http.get(url.clone());
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request.send().await?;
        let status = response.status();

        // Body as text first for better error diagnostics on bad payloads.
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                url = %url,
                body = %body.chars().take(200).collect::<String>(),
                "product API returned non-success status"
            );
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                url = %url,
                body = %body.chars().take(200).collect::<String>(),
                "failed to parse product API response"
            );
            CatalogError::Parse(e)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> CatalogClient {
        CatalogClient::new(Url::parse(base).unwrap()).unwrap()
    }

    #[test]
    fn test_endpoint_appends_to_base_path() {
        let client = client("http://localhost:4000/api");
        let url = client.endpoint(&["productos", "paginated"]);
        assert_eq!(url.as_str(), "http://localhost:4000/api/productos/paginated");
    }

    #[test]
    fn test_endpoint_handles_trailing_slash() {
        let client = client("http://localhost:4000/api/");
        let url = client.endpoint(&["categorias"]);
        assert_eq!(url.as_str(), "http://localhost:4000/api/categorias");
    }
}
