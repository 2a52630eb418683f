//! Order model.
//!
//! An [`Order`] is created `pending` from a client cart and becomes `paid`
//! once the storefront reports a completed PayPal checkout. JSON field names
//! are camelCase to match the storefront's checkout script.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OrderId, OrderStatus, Price};

/// One cart line as submitted by the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub price: Price,
}

/// Delivery address and contact details entered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub full_name: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub country: String,
    /// Customer confirmation recipient. Not validated until a message is
    /// addressed to it.
    pub email: String,
    pub phone: String,
}

/// PayPal payer identity reported with the payment confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayerInfo {
    pub name: String,
    pub email: String,
}

/// Error returned when an order cannot move to the requested status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("order {order_id} cannot move from {from} to {to}")]
pub struct OrderTransitionError {
    pub order_id: OrderId,
    pub from: OrderStatus,
    pub to: OrderStatus,
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    pub cart: Vec<LineItem>,
    /// Client-supplied total. Not reconciled against `cart`.
    pub total: Price,
    pub shipping_info: ShippingInfo,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paypal_order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_info: Option<PayerInfo>,
}

impl Order {
    /// Create a new pending order.
    #[must_use]
    pub const fn new(
        order_id: OrderId,
        cart: Vec<LineItem>,
        total: Price,
        shipping_info: ShippingInfo,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            order_id,
            cart,
            total,
            shipping_info,
            status: OrderStatus::Pending,
            created_at,
            paid_at: None,
            paypal_order_id: None,
            payer_info: None,
        }
    }

    /// Record a confirmed payment.
    ///
    /// # Errors
    ///
    /// Returns [`OrderTransitionError`] if the order is not pending. The order
    /// is left untouched in that case.
    pub fn mark_paid(
        &mut self,
        paypal_order_id: String,
        payer_info: PayerInfo,
        paid_at: DateTime<Utc>,
    ) -> Result<(), OrderTransitionError> {
        if !self.status.can_transition_to(OrderStatus::Paid) {
            return Err(OrderTransitionError {
                order_id: self.order_id.clone(),
                from: self.status,
                to: OrderStatus::Paid,
            });
        }

        self.status = OrderStatus::Paid;
        self.paid_at = Some(paid_at);
        self.paypal_order_id = Some(paypal_order_id);
        self.payer_info = Some(payer_info);
        Ok(())
    }
}
