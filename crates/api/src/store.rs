//! In-memory order store.
//!
//! Orders live for the lifetime of the process and are never deleted. The
//! store is owned by [`crate::state::AppState`] and handed to handlers through
//! axum state; there is no global.
//!
//! All mutations happen under a single write lock, so the `pending -> paid`
//! transition is a compare-and-swap: of two concurrent confirmations for the
//! same order exactly one succeeds.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use nourel_core::{LineItem, Order, OrderId, PayerInfo, Price, ShippingInfo};
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors returned by [`OrderStore`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No order with this ID exists.
    #[error("order not found: {0}")]
    NotFound(OrderId),

    /// The order has already been marked paid.
    #[error("order already paid: {0}")]
    AlreadyPaid(OrderId),
}

/// Process-lifetime collection of orders.
#[derive(Debug)]
pub struct OrderStore {
    prefix: String,
    book: RwLock<OrderBook>,
}

#[derive(Debug, Default)]
struct OrderBook {
    orders: Vec<Order>,
    index: HashMap<OrderId, usize>,
    last_issued_millis: Option<i64>,
}

impl OrderBook {
    /// Next ID timestamp: `now`, or one past the last issued if the clock has
    /// not advanced.
    fn next_millis(&mut self, now_millis: i64) -> i64 {
        let millis = match self.last_issued_millis {
            Some(last) if now_millis <= last => last + 1,
            _ => now_millis,
        };
        self.last_issued_millis = Some(millis);
        millis
    }
}

impl OrderStore {
    /// Create an empty store issuing IDs as `<prefix>-<epoch millis>`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            book: RwLock::new(OrderBook::default()),
        }
    }

    /// Record a new pending order and return its ID.
    ///
    /// Neither the cart nor the total is validated; the total is stored as
    /// the client sent it.
    pub async fn create(
        &self,
        cart: Vec<LineItem>,
        total: Price,
        shipping_info: ShippingInfo,
    ) -> OrderId {
        self.create_at(cart, total, shipping_info, Utc::now()).await
    }

    async fn create_at(
        &self,
        cart: Vec<LineItem>,
        total: Price,
        shipping_info: ShippingInfo,
        now: DateTime<Utc>,
    ) -> OrderId {
        let mut book = self.book.write().await;

        let millis = book.next_millis(now.timestamp_millis());
        let order_id = OrderId::from_parts(&self.prefix, millis);
        let order = Order::new(order_id.clone(), cart, total, shipping_info, now);

        let position = book.orders.len();
        book.orders.push(order);
        book.index.insert(order_id.clone(), position);

        order_id
    }

    /// Mark an order paid and return a snapshot of the updated order.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if the ID is unknown; nothing is mutated.
    /// - [`StoreError::AlreadyPaid`] if payment was already recorded; the
    ///   first payment's details are kept.
    pub async fn mark_paid(
        &self,
        order_id: &OrderId,
        paypal_order_id: String,
        payer_info: PayerInfo,
    ) -> Result<Order, StoreError> {
        let mut book = self.book.write().await;

        let position = *book
            .index
            .get(order_id)
            .ok_or_else(|| StoreError::NotFound(order_id.clone()))?;
        let order = book
            .orders
            .get_mut(position)
            .ok_or_else(|| StoreError::NotFound(order_id.clone()))?;

        order
            .mark_paid(paypal_order_id, payer_info, Utc::now())
            .map_err(|_| StoreError::AlreadyPaid(order_id.clone()))?;

        Ok(order.clone())
    }

    /// Snapshot of every order, in creation order.
    pub async fn list_all(&self) -> Vec<Order> {
        self.book.read().await.orders.clone()
    }

    /// Number of orders recorded since startup.
    pub async fn len(&self) -> usize {
        self.book.read().await.orders.len()
    }

    /// Whether no order has been recorded yet.
    pub async fn is_empty(&self) -> bool {
        self.book.read().await.orders.is_empty()
    }
}
