//! Integration tests for payment confirmation and the notification emails.

use nourel_core::OrderStatus;
use nourel_integration_tests::{
    CUSTOMER_EMAIL, RecordingMailer, SELLER_EMAIL, TestContext,
};
use serde_json::json;

// =============================================================================
// Happy Path
// =============================================================================

#[tokio::test]
async fn test_payment_success_marks_order_paid() {
    let ctx = TestContext::new().await;
    let order_id = ctx.create_sample_order().await;

    let (status, body) = ctx.confirm_payment(&order_id).await;

    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "message": "Paiement confirmé et emails envoyés" })
    );

    let orders = ctx.state.orders().list_all().await;
    let order = orders.first().expect("one order");
    assert_eq!(order.status, OrderStatus::Paid);
    assert!(order.paid_at.is_some());
    assert_eq!(order.paypal_order_id.as_deref(), Some("8XY12345AB678901C"));
    assert_eq!(
        order.payer_info.as_ref().map(|p| p.name.as_str()),
        Some("Amina Benali")
    );
}

#[tokio::test]
async fn test_payment_success_emails_seller_then_customer() {
    let ctx = TestContext::new().await;
    let order_id = ctx.create_sample_order().await;

    ctx.confirm_payment(&order_id).await;

    let sent = ctx.mailer.sent();
    assert_eq!(sent.len(), 2);

    let seller = sent.first().expect("seller email");
    assert_eq!(seller.to.as_str(), SELLER_EMAIL);
    assert!(seller.subject.contains(&order_id));
    assert!(seller.text_body.contains("Bag"));
    assert!(seller.text_body.contains("100.00 €"));
    assert!(seller.text_body.contains("8XY12345AB678901C"));

    let customer = sent.get(1).expect("customer email");
    assert_eq!(customer.to.as_str(), CUSTOMER_EMAIL);
    assert!(customer.subject.starts_with("Confirmation de commande"));
    assert!(customer.subject.contains(&order_id));
    assert!(customer.html_body.contains("Amina Benali"));
}

#[tokio::test]
async fn test_paid_order_listed_with_payment_details() {
    let ctx = TestContext::new().await;
    let order_id = ctx.create_sample_order().await;
    ctx.confirm_payment(&order_id).await;

    let (_, body) = ctx.get_json("/api/orders").await;
    let order = &body["orders"][0];

    assert_eq!(order["status"], "paid");
    assert_eq!(order["paypalOrderId"], "8XY12345AB678901C");
    assert_eq!(order["payerInfo"]["email"], "amina.payer@example.com");
    assert!(order["paidAt"].is_string());
}

// =============================================================================
// Rejections
// =============================================================================

#[tokio::test]
async fn test_payment_for_unknown_order_is_not_found() {
    let ctx = TestContext::new().await;
    let order_id = ctx.create_sample_order().await;

    let (status, body) = ctx.confirm_payment("NOUREL-0").await;

    assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "success": false, "error": "Commande non trouvée" })
    );
    assert!(ctx.mailer.sent().is_empty());

    let orders = ctx.state.orders().list_all().await;
    let order = orders.first().expect("one order");
    assert_eq!(order.order_id.as_str(), order_id);
    assert_eq!(order.status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_second_payment_is_conflict_without_emails() {
    let ctx = TestContext::new().await;
    let order_id = ctx.create_sample_order().await;
    ctx.confirm_payment(&order_id).await;

    let (status, body) = ctx.confirm_payment(&order_id).await;

    assert_eq!(status, reqwest::StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Commande déjà payée");
    assert_eq!(ctx.mailer.sent().len(), 2);
}

#[tokio::test]
async fn test_payment_rejects_malformed_body() {
    let ctx = TestContext::new().await;
    let order_id = ctx.create_sample_order().await;

    let (status, body) = ctx
        .post_json("/api/payment-success", &json!({ "orderId": order_id }))
        .await;

    assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(ctx.mailer.sent().is_empty());
}

// =============================================================================
// Delivery Failures
// =============================================================================

#[tokio::test]
async fn test_seller_email_failure_sends_nothing_but_keeps_order_paid() {
    let ctx = TestContext::with_mailer(RecordingMailer::failing_at(0)).await;
    let order_id = ctx.create_sample_order().await;

    let (status, body) = ctx.confirm_payment(&order_id).await;

    assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(ctx.mailer.sent().is_empty());

    let orders = ctx.state.orders().list_all().await;
    assert_eq!(orders.first().map(|o| o.status), Some(OrderStatus::Paid));
}

#[tokio::test]
async fn test_customer_email_failure_leaves_seller_email_sent() {
    let ctx = TestContext::with_mailer(RecordingMailer::failing_at(1)).await;
    let order_id = ctx.create_sample_order().await;

    let (status, body) = ctx.confirm_payment(&order_id).await;

    assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());

    let sent = ctx.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent.first().map(|e| e.to.as_str().to_string()),
        Some(SELLER_EMAIL.to_string())
    );

    let orders = ctx.state.orders().list_all().await;
    assert_eq!(orders.first().map(|o| o.status), Some(OrderStatus::Paid));
}
