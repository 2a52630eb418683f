//! Integration tests for the NOUREL order API.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p nourel-integration-tests
//! ```
//!
//! Each test starts the real router (same middleware stack as the binary) on
//! an ephemeral localhost port and talks to it over HTTP with `reqwest`.
//! Mail goes to a [`RecordingMailer`] instead of SMTP, so no network access
//! or credentials are needed.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use nourel_api::{
    AppState, app,
    config::ShopConfig,
    services::{EmailError, Mailer, OrderNotifier, OutgoingEmail},
    store::OrderStore,
};
use nourel_core::Email;
use serde_json::{Value, json};

/// Seller address every test server is configured with.
pub const SELLER_EMAIL: &str = "commandes@nourel.com";

/// Customer address used by [`sample_order`].
pub const CUSTOMER_EMAIL: &str = "amina@example.com";

/// Mailer that keeps every email in memory.
///
/// Can be told to fail a given send attempt (zero-based) to simulate an SMTP
/// outage part-way through the notification sequence.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    attempts: Mutex<usize>,
    fail_at: Option<usize>,
}

impl RecordingMailer {
    /// A mailer whose `attempt`-th send fails.
    #[must_use]
    pub fn failing_at(attempt: usize) -> Self {
        Self {
            fail_at: Some(attempt),
            ..Self::default()
        }
    }

    /// Emails delivered so far, in send order.
    #[must_use]
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), EmailError> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap_or_else(PoisonError::into_inner);
            let current = *attempts;
            *attempts += 1;
            current
        };

        if self.fail_at == Some(attempt) {
            return Err(EmailError::Transport(format!(
                "simulated outage on send #{attempt}"
            )));
        }

        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(email);
        Ok(())
    }
}

/// A running API server plus handles to inspect it.
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: String,
    pub state: AppState,
    pub mailer: Arc<RecordingMailer>,
}

impl TestContext {
    /// Start a server whose mail always succeeds.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot bind a local port.
    pub async fn new() -> Self {
        Self::with_mailer(RecordingMailer::default()).await
    }

    /// Start a server delivering through `mailer`.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot bind a local port.
    pub async fn with_mailer(mailer: RecordingMailer) -> Self {
        let mailer = Arc::new(mailer);
        let shop = ShopConfig::default();
        let seller = Email::parse(SELLER_EMAIL).expect("valid seller email");
        let notifier = OrderNotifier::new(mailer.clone(), seller, shop.clone());
        let state = AppState::new(OrderStore::new(shop.name), notifier);

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let router = app(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test server error");
        });

        Self {
            client: reqwest::Client::new(),
            base_url: format!("http://{addr}"),
            state,
            mailer,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// POST a JSON body and return status plus parsed JSON response.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the response is not JSON.
    pub async fn post_json(&self, path: &str, body: &Value) -> (reqwest::StatusCode, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Request failed");
        let status = resp.status();
        let json = resp.json::<Value>().await.expect("Response is not JSON");
        (status, json)
    }

    /// GET a path and return status plus parsed JSON response.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the response is not JSON.
    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, Value) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed");
        let status = resp.status();
        let json = resp.json::<Value>().await.expect("Response is not JSON");
        (status, json)
    }

    /// Create an order from [`sample_order`] and return its ID.
    ///
    /// # Panics
    ///
    /// Panics if the API does not report success.
    pub async fn create_sample_order(&self) -> String {
        let (status, body) = self.post_json("/api/create-order", &sample_order()).await;
        assert!(status.is_success(), "create-order failed: {body}");
        body["orderId"]
            .as_str()
            .expect("orderId is a string")
            .to_string()
    }

    /// Confirm payment for `order_id` with fixed PayPal details.
    pub async fn confirm_payment(&self, order_id: &str) -> (reqwest::StatusCode, Value) {
        self.post_json("/api/payment-success", &payment_for(order_id))
            .await
    }
}

/// The checkout body from the storefront's one-item example.
#[must_use]
pub fn sample_order() -> Value {
    json!({
        "cart": [{ "name": "Bag", "price": 100 }],
        "total": 100,
        "shippingInfo": {
            "fullName": "Amina Benali",
            "address": "12 rue de la Paix",
            "postalCode": "75002",
            "city": "Paris",
            "country": "France",
            "email": CUSTOMER_EMAIL,
            "phone": "+33 6 12 34 56 78"
        }
    })
}

/// A payment confirmation body for `order_id`.
#[must_use]
pub fn payment_for(order_id: &str) -> Value {
    json!({
        "orderId": order_id,
        "paypalOrderId": "8XY12345AB678901C",
        "payerInfo": { "name": "Amina Benali", "email": "amina.payer@example.com" }
    })
}
