//! Client-side query cache for Kolaz.
//!
//! This crate provides:
//! - `QueryKey` - Hierarchical keys that can be invalidated by prefix
//! - `QueryPolicy` - Per-query stale times
//! - `QueryCache` - An async cache that fetches on miss and never stores errors
//!
//! # Example
//!
//! ```ignore
//! use kolaz_cache::{QueryCache, QueryKey, QueryPolicy};
//!
//! let cache: QueryCache<Vec<Product>> = QueryCache::new();
//! let featured = cache
//!     .get_or_fetch(
//!         QueryKey::new(["products", "featured"]),
//!         QueryPolicy::featured(),
//!         || api.featured(),
//!     )
//!     .await?;
//!
//! // After an admin edit
//! cache.invalidate_prefix(&QueryKey::new(["products"]))?;
//! ```

mod cache;
mod key;
mod policy;

pub use cache::{QueryCache, DEFAULT_MAX_CAPACITY};
pub use key::QueryKey;
pub use policy::QueryPolicy;

/// Cache errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache invalidation failed: {0}")]
    Invalidation(String),
}
