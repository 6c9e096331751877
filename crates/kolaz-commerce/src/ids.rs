//! Newtype IDs for storefront identifiers.
//!
//! Products are keyed by SKU, cart lines by their variant, orders by the
//! `ORD-` number shown to customers. Keeping each in its own type stops a
//! line item id from being passed where a product id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new unique ID.
            pub fn generate() -> Self {
                Self(generate_id())
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

define_id!(
    /// Product identifier. The storefront uses the SKU.
    ProductId
);
define_id!(
    /// Cart line identifier, derived from product and variant.
    LineItemId
);
define_id!(
    /// Order number, e.g. `ORD-1718000000000`.
    OrderId
);
define_id!(AddressId);
define_id!(UserId);
define_id!(CustomerId);

impl LineItemId {
    /// Derive the line id for a product variant.
    ///
    /// Two selections of the same product, size and color always produce the
    /// same id, which is what lets the cart merge them.
    pub fn for_variant(product_id: &ProductId, size: &str, color: &str) -> Self {
        Self(format!("{}-{}-{}", product_id, size, color))
    }
}

impl OrderId {
    /// Build an order number from a millisecond timestamp.
    pub fn from_millis(millis: i64) -> Self {
        Self(format!("ORD-{}", millis))
    }
}

/// Generate a unique ID from the clock and a process-wide counter.
fn generate_id() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);

    format!("{:x}{:04x}", timestamp, counter & 0xffff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("IRT-DJ-001");
        assert_eq!(id.as_str(), "IRT-DJ-001");
    }

    #[test]
    fn test_id_generation() {
        let id1 = UserId::generate();
        let id2 = UserId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_line_item_id_for_variant() {
        let product = ProductId::new("IRT-DJ-001");
        let a = LineItemId::for_variant(&product, "32", "Indigo");
        let b = LineItemId::for_variant(&product, "32", "Indigo");
        let c = LineItemId::for_variant(&product, "34", "Indigo");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str(), "IRT-DJ-001-32-Indigo");
    }

    #[test]
    fn test_order_id_from_millis() {
        let id = OrderId::from_millis(1_700_000_000_123);
        assert_eq!(id.to_string(), "ORD-1700000000123");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ProductId::new("SKU-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"SKU-1\"");
    }
}
