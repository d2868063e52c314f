//! Cart mutations and persistence driven through the JSON API.

use serde_json::json;

use mars_mayorista_integration_tests::{TestHarness, add_request};

// =============================================================================
// Add: merge-or-insert with stock clamp
// =============================================================================

#[tokio::test]
async fn test_add_merges_by_identity_and_clamps_to_stock() {
    let harness = TestHarness::new().await;

    let (status, _) = harness
        .send("POST", "/api/cart/items", Some(add_request(1, 5, 3)))
        .await;
    assert_eq!(status, 200);

    let (status, cart) = harness
        .send("POST", "/api/cart/items", Some(add_request(1, 5, 4)))
        .await;
    assert_eq!(status, 200);

    // One line for the identity, quantity clamped from 7 to the stock of 5.
    let items = cart["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 5);
    assert_eq!(cart["itemCount"], 5);
    assert_eq!(cart["total"], "$750.00");
}

#[tokio::test]
async fn test_add_new_identity_beyond_stock_stores_stock() {
    let harness = TestHarness::new().await;

    let (_, cart) = harness
        .send("POST", "/api/cart/items", Some(add_request(1, 3, 50)))
        .await;

    assert_eq!(cart["items"][0]["quantity"], 3);
}

#[tokio::test]
async fn test_add_defaults_to_quantity_one() {
    let harness = TestHarness::new().await;

    let (_, cart) = harness
        .send(
            "POST",
            "/api/cart/items",
            Some(mars_mayorista_integration_tests::product_json(1, 9)),
        )
        .await;

    assert_eq!(cart["items"][0]["quantity"], 1);
}

// =============================================================================
// SetQuantity: floor-to-1 coercion plus stock clamp
// =============================================================================

#[tokio::test]
async fn test_set_quantity_clamps_into_valid_range() {
    let harness = TestHarness::new().await;
    harness
        .send("POST", "/api/cart/items", Some(add_request(1, 5, 2)))
        .await;

    let (_, cart) = harness
        .send("PATCH", "/api/cart/items/1", Some(json!({"quantity": 100})))
        .await;
    assert_eq!(cart["items"][0]["quantity"], 5);

    let (_, cart) = harness
        .send("PATCH", "/api/cart/items/1", Some(json!({"quantity": -2})))
        .await;
    assert_eq!(cart["items"][0]["quantity"], 1);
}

#[tokio::test]
async fn test_set_quantity_coerces_invalid_input_to_one() {
    let harness = TestHarness::new().await;
    harness
        .send("POST", "/api/cart/items", Some(add_request(1, 5, 4)))
        .await;

    // A cleared number input submits garbage; the floor is 1, not an error.
    let (status, cart) = harness
        .send("PATCH", "/api/cart/items/1", Some(json!({"quantity": "abc"})))
        .await;
    assert_eq!(status, 200);
    assert_eq!(cart["items"][0]["quantity"], 1);

    let (_, cart) = harness
        .send("PATCH", "/api/cart/items/1", Some(json!({})))
        .await;
    assert_eq!(cart["items"][0]["quantity"], 1);
}

#[tokio::test]
async fn test_set_quantity_on_absent_identity_is_noop() {
    let harness = TestHarness::new().await;
    harness
        .send("POST", "/api/cart/items", Some(add_request(1, 5, 2)))
        .await;

    let (status, cart) = harness
        .send("PATCH", "/api/cart/items/999", Some(json!({"quantity": 3})))
        .await;
    assert_eq!(status, 200);
    assert_eq!(cart["items"].as_array().expect("items").len(), 1);
    assert_eq!(cart["items"][0]["quantity"], 2);
}

// =============================================================================
// Remove / Clear
// =============================================================================

#[tokio::test]
async fn test_remove_then_add_is_a_fresh_insert() {
    let harness = TestHarness::new().await;
    harness
        .send("POST", "/api/cart/items", Some(add_request(1, 5, 4)))
        .await;

    let (_, cart) = harness.send("DELETE", "/api/cart/items/1", None).await;
    assert!(cart["items"].as_array().expect("items").is_empty());

    let (_, cart) = harness
        .send("POST", "/api/cart/items", Some(add_request(1, 5, 2)))
        .await;
    // No residual quantity from the removed line.
    assert_eq!(cart["items"][0]["quantity"], 2);
}

#[tokio::test]
async fn test_clear_empties_cart_and_total() {
    let harness = TestHarness::new().await;
    harness
        .send("POST", "/api/cart/items", Some(add_request(1, 5, 2)))
        .await;
    harness
        .send("POST", "/api/cart/items", Some(add_request(2, 8, 1)))
        .await;

    let (status, cart) = harness.send("DELETE", "/api/cart", None).await;
    assert_eq!(status, 200);
    assert!(cart["items"].as_array().expect("items").is_empty());
    assert_eq!(cart["total"], "$0.00");
    assert_eq!(cart["itemCount"], 0);

    let (_, count) = harness.send("GET", "/api/cart/count", None).await;
    assert_eq!(count["count"], 0);
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn test_cart_survives_a_service_restart() {
    let mut harness = TestHarness::new().await;
    harness
        .send("POST", "/api/cart/items", Some(add_request(1, 5, 3)))
        .await;
    harness
        .send("POST", "/api/cart/items", Some(add_request(2, 9, 1)))
        .await;

    harness.restart();

    let (status, cart) = harness.send("GET", "/api/cart", None).await;
    assert_eq!(status, 200);

    // Same identities, quantities, and order as before the restart.
    let items = cart["items"].as_array().expect("items");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], 1);
    assert_eq!(items[0]["quantity"], 3);
    assert_eq!(items[1]["id"], 2);
    assert_eq!(cart["itemCount"], 4);
}
