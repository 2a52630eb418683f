//! Order route handlers.
//!
//! The storefront calls `create-order` before opening PayPal checkout and
//! `payment-success` once PayPal reports the capture. Payment itself is never
//! verified here; the client has already settled it.

use axum::{Json, extract::State};
use nourel_core::{LineItem, Order, OrderId, PayerInfo, Price, ShippingInfo};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::extract::ApiJson;
use crate::state::AppState;

const PAYMENT_CONFIRMED: &str = "Paiement confirmé et emails envoyés";

/// Cart submitted at checkout.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub cart: Vec<LineItem>,
    pub total: Price,
    pub shipping_info: ShippingInfo,
}

/// Response for a recorded order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order_id: OrderId,
}

/// Payment confirmation relayed from PayPal checkout.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSuccessRequest {
    pub order_id: OrderId,
    pub paypal_order_id: String,
    pub payer_info: PayerInfo,
}

/// Response for a confirmed payment.
#[derive(Debug, Serialize)]
pub struct PaymentSuccessResponse {
    pub success: bool,
    pub message: String,
}

/// Response listing every order.
#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub success: bool,
    pub orders: Vec<Order>,
}

/// Record a pending order.
#[instrument(skip_all, fields(items = body.cart.len()))]
pub async fn create_order(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateOrderRequest>,
) -> Json<CreateOrderResponse> {
    let order_id = state
        .orders()
        .create(body.cart, body.total, body.shipping_info)
        .await;

    tracing::info!(order_id = %order_id, total = %body.total, "Order created");

    Json(CreateOrderResponse {
        success: true,
        order_id,
    })
}

/// Mark an order paid, then notify the seller and the customer.
///
/// The order stays paid even if an email fails afterwards. A later retry
/// gets 409, so the failure is logged with the order ID for manual resend.
///
/// # Errors
///
/// - 404 if the order does not exist
/// - 409 if the order was already paid (no email is sent again)
/// - 500 if either email cannot be sent
#[instrument(skip_all, fields(order_id = %body.order_id, paypal_order_id = %body.paypal_order_id))]
pub async fn payment_success(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<PaymentSuccessRequest>,
) -> Result<Json<PaymentSuccessResponse>> {
    let order = state
        .orders()
        .mark_paid(&body.order_id, body.paypal_order_id, body.payer_info)
        .await?;

    if let Err(err) = state.notifier().notify_order_paid(&order).await {
        // Retries are rejected as already paid, so this log is the only
        // record of which emails still have to be sent by hand.
        tracing::error!(
            order_id = %order.order_id,
            customer_email = %order.shipping_info.email,
            seller_notified = err.seller_notified(),
            error = %err,
            "Order paid but notification failed"
        );
        return Err(err.into());
    }

    tracing::info!(order_id = %order.order_id, "Emails sent for paid order");

    Ok(Json(PaymentSuccessResponse {
        success: true,
        message: PAYMENT_CONFIRMED.to_string(),
    }))
}

/// Dump every order in creation order.
pub async fn list_orders(State(state): State<AppState>) -> Json<OrdersResponse> {
    Json(OrdersResponse {
        success: true,
        orders: state.orders().list_all().await,
    })
}
