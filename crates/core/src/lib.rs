//! NOUREL Core - Shared domain types.
//!
//! This crate provides the types shared by the order backend:
//! - `api` - HTTP server, in-memory order store and email notifications
//! - `integration-tests` - Black-box tests against the HTTP surface
//!
//! # Architecture
//!
//! The core crate contains only types and their invariants - no I/O, no HTTP,
//! no mail transport. The `pending -> paid` lifecycle of an [`Order`] is
//! enforced here so that every caller goes through the same transition.
//!
//! # Modules
//!
//! - [`types`] - Order model, type-safe order IDs, prices, emails and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
