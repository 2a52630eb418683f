//! Business logic services.
//!
//! # Services
//!
//! - `email` - Mail transport seam and SMTP delivery via lettre
//! - `notifications` - Seller and customer emails for paid orders

pub mod email;
pub mod notifications;

pub use email::{EmailError, Mailer, OutgoingEmail, SmtpMailer};
pub use notifications::{NotificationError, OrderNotifier};
