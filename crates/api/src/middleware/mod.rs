//! HTTP middleware.
//!
//! Layer order in [`crate::app`], outermost first: Sentry (added in `main`),
//! CORS, `TraceLayer`, then [`request_id_middleware`], which records into the
//! span the trace layer opened.

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
