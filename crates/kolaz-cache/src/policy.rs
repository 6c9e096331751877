//! Per-query staleness policies.

use serde::{Deserialize, Serialize};
use std::time::Duration;

const MINUTE: u64 = 60;

/// How long a cached query result stays fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPolicy {
    pub stale_time: Duration,
}

impl QueryPolicy {
    pub const fn new(stale_time: Duration) -> Self {
        Self { stale_time }
    }

    /// The full product list: 5 minutes.
    pub const fn all_products() -> Self {
        Self::new(Duration::from_secs(5 * MINUTE))
    }

    /// Featured products: 10 minutes.
    pub const fn featured() -> Self {
        Self::new(Duration::from_secs(10 * MINUTE))
    }

    /// Best sellers: 10 minutes.
    pub const fn best_sellers() -> Self {
        Self::new(Duration::from_secs(10 * MINUTE))
    }

    /// Color list: 1 hour.
    pub const fn colors() -> Self {
        Self::new(Duration::from_secs(60 * MINUTE))
    }

    /// Category list: 1 hour.
    pub const fn categories() -> Self {
        Self::new(Duration::from_secs(60 * MINUTE))
    }

    /// A single product: 5 minutes.
    pub const fn single() -> Self {
        Self::new(Duration::from_secs(5 * MINUTE))
    }

    /// Products in a category: 10 minutes.
    pub const fn by_category() -> Self {
        Self::new(Duration::from_secs(10 * MINUTE))
    }

    /// Related products: 10 minutes.
    pub const fn related() -> Self {
        Self::new(Duration::from_secs(10 * MINUTE))
    }
}

impl Default for QueryPolicy {
    fn default() -> Self {
        Self::all_products()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(QueryPolicy::all_products().stale_time, Duration::from_secs(300));
        assert_eq!(QueryPolicy::featured().stale_time, Duration::from_secs(600));
        assert_eq!(QueryPolicy::colors().stale_time, Duration::from_secs(3600));
        assert_eq!(QueryPolicy::single(), QueryPolicy::default());
    }
}
