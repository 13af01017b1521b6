//! Newtype IDs for type-safe identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A string identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderNumber);

impl OrderNumber {
    /// Derive a display order number from a timestamp.
    ///
    /// Last six digits of the millisecond Unix timestamp. Not unique: orders
    /// placed exactly 1000 seconds apart share a number.
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        let millis = at.timestamp_millis().rem_euclid(1_000_000);
        Self(format!("ORD-{:06}", millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("1");
        assert_eq!(id.as_str(), "1");
    }

    #[test]
    fn test_id_from_string() {
        let id: ProductId = "4".into();
        assert_eq!(id.as_str(), "4");
        assert_eq!(format!("{}", id), "4");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ProductId::new("3");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"3\"");
    }

    #[test]
    fn test_order_number_uses_last_six_millis_digits() {
        let at = Utc.timestamp_millis_opt(1_760_000_123_456).unwrap();
        assert_eq!(OrderNumber::from_timestamp(at).as_str(), "ORD-123456");
    }

    #[test]
    fn test_order_number_is_zero_padded() {
        let at = Utc.timestamp_millis_opt(1_760_000_000_042).unwrap();
        assert_eq!(OrderNumber::from_timestamp(at).as_str(), "ORD-000042");
    }
}
