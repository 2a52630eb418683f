//! Order identifiers.
//!
//! Order IDs are human-readable strings of the form `<PREFIX>-<epoch millis>`
//! (e.g. `NOUREL-1760870400000`). They travel through PayPal metadata and
//! email subjects, so they stay plain strings on the wire.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A type-safe order identifier.
///
/// Any string deserializes into an `OrderId` so that lookups for unknown or
/// foreign IDs reach the store and fail there as "not found" rather than as a
/// malformed request.
///
/// # Example
///
/// ```rust
/// use nourel_core::OrderId;
///
/// let id = OrderId::from_parts("NOUREL", 1_760_870_400_000);
/// assert_eq!(id.as_str(), "NOUREL-1760870400000");
/// assert_eq!(id.timestamp_millis(), Some(1_760_870_400_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Build an order ID from a namespace prefix and a millisecond timestamp.
    #[must_use]
    pub fn from_parts(prefix: &str, millis: i64) -> Self {
        Self(format!("{prefix}-{millis}"))
    }

    /// Returns the order ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the timestamp part of a generated ID, if it has one.
    #[must_use]
    pub fn timestamp_millis(&self) -> Option<i64> {
        self.0.rsplit_once('-').and_then(|(_, ts)| ts.parse().ok())
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
