//! Paid-order notifications.
//!
//! When a payment is confirmed two emails go out, in this order:
//!
//! 1. **Seller notification** to the configured seller address, summarizing
//!    the order, the PayPal payment and the payer.
//! 2. **Customer confirmation** to `shippingInfo.email`, with the items, the
//!    delivery address and shop branding.
//!
//! Both are rendered before anything is sent, so a template failure never
//! produces a partial send. A delivery failure of the second email leaves the
//! first one sent; [`NotificationError`] says which one failed.

use std::sync::Arc;

use askama::Template;
use chrono::Local;
use nourel_core::{Email, Order};
use thiserror::Error;

use crate::config::ShopConfig;
use crate::services::email::{EmailError, Mailer, OutgoingEmail};

const DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Errors raised while notifying about a paid order.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Template rendering failed; nothing was sent.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// The seller notification could not be delivered; nothing was sent.
    #[error("Seller notification failed: {0}")]
    Seller(#[source] EmailError),

    /// The customer confirmation could not be delivered; the seller
    /// notification had already been sent.
    #[error("Customer confirmation failed: {0}")]
    Customer(#[source] EmailError),
}

impl NotificationError {
    /// Whether the seller notification went out before the failure.
    #[must_use]
    pub const fn seller_notified(&self) -> bool {
        matches!(self, Self::Customer(_))
    }
}

/// One cart line, formatted for display.
struct ItemLine<'a> {
    name: &'a str,
    price: String,
}

/// Everything the order email templates show.
struct OrderEmail<'a> {
    shop: &'a ShopConfig,
    order: &'a Order,
    paypal_order_id: &'a str,
    payer_name: &'a str,
    payer_email: &'a str,
    date: String,
    total: String,
    items: Vec<ItemLine<'a>>,
}

impl<'a> OrderEmail<'a> {
    fn new(order: &'a Order, shop: &'a ShopConfig) -> Self {
        let paid_at = order.paid_at.unwrap_or(order.created_at);
        let payer = order.payer_info.as_ref();

        Self {
            shop,
            order,
            paypal_order_id: order.paypal_order_id.as_deref().unwrap_or("-"),
            payer_name: payer.map_or("-", |p| p.name.as_str()),
            payer_email: payer.map_or("-", |p| p.email.as_str()),
            date: paid_at.with_timezone(&Local).format(DATE_FORMAT).to_string(),
            total: order.total.display(),
            items: order
                .cart
                .iter()
                .map(|item| ItemLine {
                    name: &item.name,
                    price: item.price.display(),
                })
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "email/seller_order.html")]
struct SellerOrderHtml<'a> {
    email: &'a OrderEmail<'a>,
}

#[derive(Template)]
#[template(path = "email/seller_order.txt")]
struct SellerOrderText<'a> {
    email: &'a OrderEmail<'a>,
}

#[derive(Template)]
#[template(path = "email/customer_confirmation.html")]
struct CustomerConfirmationHtml<'a> {
    email: &'a OrderEmail<'a>,
}

#[derive(Template)]
#[template(path = "email/customer_confirmation.txt")]
struct CustomerConfirmationText<'a> {
    email: &'a OrderEmail<'a>,
}

/// Sends the seller and customer emails for paid orders.
#[derive(Clone)]
pub struct OrderNotifier {
    mailer: Arc<dyn Mailer>,
    seller: Email,
    shop: ShopConfig,
}

impl OrderNotifier {
    /// Create a notifier delivering through `mailer`.
    #[must_use]
    pub fn new(mailer: Arc<dyn Mailer>, seller: Email, shop: ShopConfig) -> Self {
        Self {
            mailer,
            seller,
            shop,
        }
    }

    /// Shop branding used in the emails.
    #[must_use]
    pub const fn shop(&self) -> &ShopConfig {
        &self.shop
    }

    /// Send the seller notification, then the customer confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError`] if rendering fails or either email
    /// cannot be delivered.
    pub async fn notify_order_paid(&self, order: &Order) -> Result<(), NotificationError> {
        let (seller_email, customer_email) = self.render(order)?;

        self.mailer
            .send(seller_email)
            .await
            .map_err(NotificationError::Seller)?;
        tracing::debug!(order_id = %order.order_id, "Seller notification sent");

        self.mailer
            .send(customer_email)
            .await
            .map_err(NotificationError::Customer)?;
        tracing::debug!(order_id = %order.order_id, "Customer confirmation sent");

        Ok(())
    }

    fn render(&self, order: &Order) -> Result<(OutgoingEmail, OutgoingEmail), askama::Error> {
        let content = OrderEmail::new(order, &self.shop);

        let seller = OutgoingEmail {
            to: self.seller.to_string(),
            subject: format!(
                "🛍️ Nouvelle commande {} - {}",
                self.shop.name, order.order_id
            ),
            text_body: SellerOrderText { email: &content }.render()?,
            html_body: SellerOrderHtml { email: &content }.render()?,
        };

        let customer = OutgoingEmail {
            to: order.shipping_info.email.clone(),
            subject: format!(
                "Confirmation de commande {} - {}",
                self.shop.name, order.order_id
            ),
            text_body: CustomerConfirmationText { email: &content }.render()?,
            html_body: CustomerConfirmationHtml { email: &content }.render()?,
        };

        Ok((seller, customer))
    }
}
