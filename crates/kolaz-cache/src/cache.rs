//! Query cache backed by `moka`.

use crate::{CacheError, QueryKey, QueryPolicy};
use moka::future::Cache;
use moka::Expiry;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Upper bound on cached queries.
pub const DEFAULT_MAX_CAPACITY: u64 = 1_000;

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    stale_time: Duration,
}

/// Expires each entry after the stale time of the policy it was stored with.
struct StaleTime;

impl<V> Expiry<QueryKey, Entry<V>> for StaleTime {
    fn expire_after_create(
        &self,
        _key: &QueryKey,
        entry: &Entry<V>,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.stale_time)
    }

    fn expire_after_update(
        &self,
        _key: &QueryKey,
        entry: &Entry<V>,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.stale_time)
    }
}

/// Cache of query results keyed by [`QueryKey`].
///
/// A stale entry is treated as absent: the next read refetches it. Failed
/// fetches are returned to the caller and never stored.
#[derive(Clone)]
pub struct QueryCache<V> {
    inner: Cache<QueryKey, Entry<V>>,
}

impl<V> QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_CAPACITY)
    }

    pub fn with_capacity(max_capacity: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .expire_after(StaleTime)
                .support_invalidation_closures()
                .build(),
        }
    }

    /// Fresh cached value, if any.
    pub async fn get(&self, key: &QueryKey) -> Option<V> {
        self.inner.get(key).await.map(|entry| entry.value)
    }

    /// Store a value under a policy, replacing any previous entry.
    pub async fn insert(&self, key: QueryKey, policy: QueryPolicy, value: V) {
        self.inner
            .insert(
                key,
                Entry {
                    value,
                    stale_time: policy.stale_time,
                },
            )
            .await;
    }

    /// Return the cached value for `key`, or run `fetch` and cache its success.
    #[instrument(skip_all, fields(key = %key))]
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: QueryKey,
        policy: QueryPolicy,
        fetch: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key).await {
            debug!("cache hit");
            return Ok(value);
        }

        debug!("cache miss");
        let value = fetch().await?;
        self.insert(key, policy, value.clone()).await;
        Ok(value)
    }

    /// Drop one entry.
    pub async fn invalidate(&self, key: &QueryKey) {
        self.inner.invalidate(key).await;
    }

    /// Drop every entry whose key starts with `prefix`.
    pub fn invalidate_prefix(&self, prefix: &QueryKey) -> Result<(), CacheError> {
        let prefix = prefix.clone();
        debug!(prefix = %prefix, "invalidating queries");
        self.inner
            .invalidate_entries_if(move |key, _| key.starts_with(&prefix))
            .map(|_| ())
            .map_err(|e| CacheError::Invalidation(e.to_string()))
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.inner.invalidate_all();
    }

    /// Number of live entries, after pending maintenance has run.
    pub async fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }
}

impl<V> Default for QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entry_count", &self.inner.entry_count())
            .finish()
    }
}
