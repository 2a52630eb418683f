//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::{ApiConfig, ShopConfig};
use crate::services::{EmailError, Mailer, OrderNotifier, SmtpMailer};
use crate::store::OrderStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Each instance owns its own
/// order store, so tests can build as many isolated servers as they need.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    orders: OrderStore,
    notifier: OrderNotifier,
}

impl AppState {
    /// Create application state from its parts.
    #[must_use]
    pub fn new(orders: OrderStore, notifier: OrderNotifier) -> Self {
        Self {
            inner: Arc::new(AppStateInner { orders, notifier }),
        }
    }

    /// Create application state delivering mail through `mailer`.
    ///
    /// The order store is empty and issues IDs prefixed with the shop name.
    #[must_use]
    pub fn with_mailer(config: &ApiConfig, mailer: Arc<dyn Mailer>) -> Self {
        let orders = OrderStore::new(config.shop.name.clone());
        let notifier = OrderNotifier::new(mailer, config.seller_email.clone(), config.shop.clone());
        Self::new(orders, notifier)
    }

    /// Create production state with SMTP delivery.
    ///
    /// # Errors
    ///
    /// Returns an error if the SMTP transport cannot be configured.
    pub fn from_config(config: &ApiConfig) -> Result<Self, EmailError> {
        let mailer = SmtpMailer::new(&config.email)?;
        Ok(Self::with_mailer(config, Arc::new(mailer)))
    }

    /// Get a reference to the order store.
    #[must_use]
    pub fn orders(&self) -> &OrderStore {
        &self.inner.orders
    }

    /// Get a reference to the paid-order notifier.
    #[must_use]
    pub fn notifier(&self) -> &OrderNotifier {
        &self.inner.notifier
    }

    /// Get the shop branding.
    #[must_use]
    pub fn shop(&self) -> &ShopConfig {
        self.inner.notifier.shop()
    }
}
