//! Core types for the order backend.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod order;
pub mod price;
pub mod status;

pub use email::{Email, EmailError};
pub use id::OrderId;
pub use order::{LineItem, Order, OrderTransitionError, PayerInfo, ShippingInfo};
pub use price::Price;
pub use status::OrderStatus;
