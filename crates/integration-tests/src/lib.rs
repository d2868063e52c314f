//! Integration tests for the Mars Mayorista storefront.
//!
//! The harness stands up the full router against a `wiremock` stand-in for
//! the product API and the order-notification endpoint, with the cart store
//! on a temp directory. Requests are driven through the router in-process
//! via `tower::ServiceExt::oneshot` - no sockets, no real network.
//!
//! # Test Categories
//!
//! - `cart_flow` - cart mutations and persistence through the JSON API
//! - `catalog_routes` - filter refresh, infinite scroll, categories, home
//! - `checkout_flow` - both delivery modes, success and failure paths

use std::path::PathBuf;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use tempfile::TempDir;
use tower::ServiceExt;
use url::Url;
use wiremock::MockServer;

use mars_mayorista_storefront::config::StorefrontConfig;
use mars_mayorista_storefront::routes;
use mars_mayorista_storefront::state::AppState;

/// A storefront wired to mock collaborators.
pub struct TestHarness {
    /// Stand-in for the product API and the notification endpoint.
    pub server: MockServer,
    router: Router,
    config: StorefrontConfig,
    _tmp: TempDir,
}

impl TestHarness {
    /// Stand up a storefront against a fresh mock server and cart store.
    ///
    /// # Panics
    ///
    /// Panics on setup failure; tests have nothing to recover to.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let tmp = TempDir::new().expect("temp dir");

        let config = test_config(&server, tmp.path().join("cart.json"));
        let router = build_router(&config);

        Self {
            server,
            router,
            config,
            _tmp: tmp,
        }
    }

    /// Rebuild the service over the same config and cart store, as a
    /// process restart would.
    pub fn restart(&mut self) {
        self.router = build_router(&self.config);
    }

    /// Issue one request against the router, returning status and JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body is not JSON.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (u16, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let request = builder.body(body).expect("request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router response");

        let status = response.status().as_u16();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body");
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };

        (status, json)
    }
}

fn test_config(server: &MockServer, cart_store_path: PathBuf) -> StorefrontConfig {
    let base = Url::parse(&server.uri()).expect("mock server URI");
    let notify_url = base.join("send-cart").expect("notify URL");

    StorefrontConfig {
        host: "127.0.0.1".parse().expect("host"),
        port: 0,
        product_api_base: base,
        notify_url,
        messaging_host: "api.whatsapp.com".to_string(),
        order_phone: "5491155550000".to_string(),
        cart_store_path,
        page_size: 12,
        search_debounce: Duration::ZERO,
        allowed_origin: None,
        sentry_dsn: None,
    }
}

fn build_router(config: &StorefrontConfig) -> Router {
    let state = AppState::new(config.clone()).expect("app state");
    routes::routes().with_state(state)
}

/// A product document in the collaborator's wire shape.
#[must_use]
pub fn product_json(id: i64, stock: u32) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "sku": format!("MARS-{id:03}"),
        "titulo": format!("Producto {id}"),
        "precio_mayorista": "150.00",
        "categoria": "Juguetes",
        "stock": stock
    })
}

/// An add-to-cart request body for [`product_json`] with a quantity.
#[must_use]
pub fn add_request(id: i64, stock: u32, quantity: u32) -> serde_json::Value {
    let mut body = product_json(id, stock);
    body["quantity"] = serde_json::json!(quantity);
    body
}
