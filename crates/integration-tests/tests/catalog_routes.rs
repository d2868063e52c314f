//! Catalog browsing through the JSON API: filter refresh, infinite scroll,
//! categories, and the home feeds.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mars_mayorista_integration_tests::{TestHarness, product_json};

fn page_json(ids: &[i64], total: u64, has_next: bool) -> serde_json::Value {
    json!({
        "data": ids.iter().map(|&id| product_json(id, 10)).collect::<Vec<_>>(),
        "pagination": { "totalItems": total, "hasNextPage": has_next }
    })
}

async fn mount_page(server: &MockServer, page: u32, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/productos/paginated"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_filters_then_load_more_accumulates_the_feed() {
    let harness = TestHarness::new().await;
    mount_page(&harness.server, 1, page_json(&[1, 2], 3, true)).await;
    mount_page(&harness.server, 2, page_json(&[2, 3], 3, false)).await;

    let (status, body) = harness
        .send("PUT", "/api/catalog/filters", Some(json!({})))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["outcome"], "applied");
    assert_eq!(body["page"], 1);
    assert_eq!(body["products"].as_array().expect("products").len(), 2);

    let (status, body) = harness.send("POST", "/api/catalog/load-more", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["outcome"], "appended");
    // Page 2 repeated id 2; only id 3 is fresh.
    assert_eq!(body["appended"], 1);
    assert_eq!(body["products"].as_array().expect("products").len(), 3);
    assert_eq!(body["hasMore"], false);

    let (_, view) = harness.send("GET", "/api/catalog", None).await;
    assert_eq!(view["page"], 2);
    assert_eq!(view["totalItems"], 3);
}

#[tokio::test]
async fn test_filter_refresh_resets_to_page_one() {
    let harness = TestHarness::new().await;
    mount_page(&harness.server, 1, page_json(&[1, 2], 20, true)).await;
    mount_page(&harness.server, 2, page_json(&[3], 20, true)).await;

    harness
        .send("PUT", "/api/catalog/filters", Some(json!({})))
        .await;
    harness.send("POST", "/api/catalog/load-more", None).await;

    // Narrowing the filters starts over from page 1 with a replaced list.
    harness.server.reset().await;
    mount_page(&harness.server, 1, page_json(&[9], 1, false)).await;

    let (_, body) = harness
        .send(
            "PUT",
            "/api/catalog/filters",
            Some(json!({ "category": "Juguetes" })),
        )
        .await;
    assert_eq!(body["outcome"], "applied");
    assert_eq!(body["page"], 1);
    let products = body["products"].as_array().expect("products");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["id"], 9);
    assert_eq!(body["filters"]["category"], "Juguetes");
}

#[tokio::test]
async fn test_catalog_fetch_failure_surfaces_as_retryable_error() {
    let harness = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path("/productos/paginated"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&harness.server)
        .await;

    let (status, body) = harness
        .send("PUT", "/api/catalog/filters", Some(json!({})))
        .await;
    assert_eq!(status, 502);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_categories_route_serves_the_upstream_list() {
    let harness = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path("/categorias"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!(["Juguetes", "Cotillon"])),
        )
        .mount(&harness.server)
        .await;

    let (status, body) = harness.send("GET", "/api/catalog/categories", None).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!(["Juguetes", "Cotillon"]));
}

#[tokio::test]
async fn test_home_feeds_degrade_per_section() {
    let harness = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path("/novedades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([product_json(7, 3)])))
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ofertas"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&harness.server)
        .await;

    let (status, body) = harness.send("GET", "/api/home", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["newArrivals"].as_array().expect("arrivals").len(), 1);
    assert!(body["offers"].as_array().expect("offers").is_empty());
}
