//! Integration tests for order creation, listing and the liveness routes.

use nourel_core::OrderStatus;
use nourel_integration_tests::{CUSTOMER_EMAIL, TestContext, sample_order};
use serde_json::json;

// =============================================================================
// Liveness
// =============================================================================

#[tokio::test]
async fn test_root_reports_api_running() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.get_json("/").await;

    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body, json!({ "message": "API NOUREL fonctionne !" }));
}

#[tokio::test]
async fn test_health_returns_ok() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.url("/health"))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(resp.text().await.expect("body"), "ok");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.url("/"))
        .header("x-request-id", "checkout-42")
        .send()
        .await
        .expect("Request failed");

    assert_eq!(
        resp.headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("checkout-42")
    );
}

#[tokio::test]
async fn test_request_id_is_generated_when_missing() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.url("/"))
        .send()
        .await
        .expect("Request failed");

    let id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id header");
    assert!(!id.is_empty());
}

#[tokio::test]
async fn test_request_id_at_length_limit_is_kept() {
    let ctx = TestContext::new().await;
    let id = "r".repeat(128);

    let resp = ctx
        .client
        .get(ctx.url("/"))
        .header("x-request-id", &id)
        .send()
        .await
        .expect("Request failed");

    assert_eq!(
        resp.headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some(id.as_str())
    );
}

#[tokio::test]
async fn test_oversized_request_id_is_replaced() {
    let ctx = TestContext::new().await;
    let id = "r".repeat(129);

    let resp = ctx
        .client
        .get(ctx.url("/"))
        .header("x-request-id", &id)
        .send()
        .await
        .expect("Request failed");

    let echoed = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id header");
    assert_ne!(echoed, id);
    assert_eq!(echoed.len(), 36, "expected a generated UUID, got {echoed}");
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn test_preflight_allows_requested_headers() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .request(reqwest::Method::OPTIONS, ctx.url("/api/create-order"))
        .header("origin", "https://shop.nourel.com")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type,x-request-id")
        .send()
        .await
        .expect("Request failed");

    assert!(resp.status().is_success());
    let headers = resp.headers();
    assert_eq!(
        headers
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let allowed = headers
        .get("access-control-allow-headers")
        .and_then(|v| v.to_str().ok())
        .expect("access-control-allow-headers")
        .to_ascii_lowercase();
    assert!(allowed.contains("content-type"), "allowed: {allowed}");
    assert!(allowed.contains("x-request-id"), "allowed: {allowed}");
    let methods = headers
        .get("access-control-allow-methods")
        .and_then(|v| v.to_str().ok())
        .expect("access-control-allow-methods");
    assert!(methods.contains("POST"), "methods: {methods}");
}

#[tokio::test]
async fn test_cross_origin_response_exposes_request_id() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.url("/api/orders"))
        .header("origin", "https://shop.nourel.com")
        .send()
        .await
        .expect("Request failed");

    let exposed = resp
        .headers()
        .get("access-control-expose-headers")
        .and_then(|v| v.to_str().ok())
        .expect("access-control-expose-headers")
        .to_ascii_lowercase();
    assert!(exposed.contains("x-request-id"), "exposed: {exposed}");
    assert!(resp.headers().contains_key("x-request-id"));
}

// =============================================================================
// Create Order
// =============================================================================

#[tokio::test]
async fn test_create_order_returns_prefixed_id() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.post_json("/api/create-order", &sample_order()).await;

    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body["success"], true);
    let order_id = body["orderId"].as_str().expect("orderId");
    assert!(order_id.starts_with("NOUREL-"), "unexpected id {order_id}");
    assert!(
        order_id
            .trim_start_matches("NOUREL-")
            .chars()
            .all(|c| c.is_ascii_digit())
    );
}

#[tokio::test]
async fn test_created_order_is_pending_and_unnotified() {
    let ctx = TestContext::new().await;

    let order_id = ctx.create_sample_order().await;

    let orders = ctx.state.orders().list_all().await;
    assert_eq!(orders.len(), 1);
    let order = orders.first().expect("one order");
    assert_eq!(order.order_id.as_str(), order_id);
    assert_eq!(order.status, OrderStatus::Pending);
    assert!(order.paid_at.is_none());
    assert!(ctx.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_create_order_ids_are_unique() {
    let ctx = TestContext::new().await;

    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(ctx.create_sample_order().await);
    }

    let mut deduped = ids.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), ids.len());
}

#[tokio::test]
async fn test_create_order_accepts_empty_cart() {
    let ctx = TestContext::new().await;
    let mut body = sample_order();
    body["cart"] = json!([]);
    body["total"] = json!(0);

    let (status, body) = ctx.post_json("/api/create-order", &body).await;

    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_create_order_rejects_malformed_body() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .post_json("/api/create-order", &json!({ "cart": "not a list" }))
        .await;

    assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
    assert!(ctx.state.orders().is_empty().await);
}

// =============================================================================
// List Orders
// =============================================================================

#[tokio::test]
async fn test_list_orders_empty() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.get_json("/api/orders").await;

    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "orders": [] }));
}

#[tokio::test]
async fn test_list_orders_in_creation_order() {
    let ctx = TestContext::new().await;
    let first = ctx.create_sample_order().await;
    let second = ctx.create_sample_order().await;
    let third = ctx.create_sample_order().await;

    let (_, body) = ctx.get_json("/api/orders").await;

    let ids: Vec<&str> = body["orders"]
        .as_array()
        .expect("orders array")
        .iter()
        .filter_map(|o| o["orderId"].as_str())
        .collect();
    assert_eq!(ids, vec![first.as_str(), second.as_str(), third.as_str()]);
}

#[tokio::test]
async fn test_list_orders_uses_wire_field_names() {
    let ctx = TestContext::new().await;
    ctx.create_sample_order().await;

    let (_, body) = ctx.get_json("/api/orders").await;
    let order = &body["orders"][0];

    assert_eq!(order["status"], "pending");
    assert_eq!(order["total"], 100.0);
    assert_eq!(order["cart"][0]["name"], "Bag");
    assert_eq!(order["cart"][0]["price"], 100.0);
    assert_eq!(order["shippingInfo"]["fullName"], "Amina Benali");
    assert_eq!(order["shippingInfo"]["postalCode"], "75002");
    assert_eq!(order["shippingInfo"]["email"], CUSTOMER_EMAIL);
    assert!(order["createdAt"].is_string());
    assert!(order.get("paidAt").is_none());
    assert!(order.get("paypalOrderId").is_none());
}
