//! Read-through response cache
//!
//! Thin wrapper over a moka async cache. Entries expire after an optional
//! TTL (no TTL means they live for the whole process) and only successful
//! fetches are stored. Two requests missing at the same time may both hit
//! the upstream; results are idempotent so the last write wins.

use moka::future::Cache;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;
use tracing::debug;

/// Keyed cache for normalized upstream responses
#[derive(Clone)]
pub struct ResponseCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    name: &'static str,
    inner: Cache<K, V>,
}

impl<K, V> std::fmt::Debug for ResponseCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("name", &self.name)
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}

impl<K, V> ResponseCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Unbounded cache; `ttl = None` keeps entries for the process lifetime
    pub fn new(name: &'static str, ttl: Option<Duration>) -> Self {
        Self::build(name, ttl, None)
    }

    /// Cache holding at most `max_entries` values
    pub fn bounded(name: &'static str, ttl: Option<Duration>, max_entries: u64) -> Self {
        Self::build(name, ttl, Some(max_entries))
    }

    fn build(name: &'static str, ttl: Option<Duration>, max_entries: Option<u64>) -> Self {
        let mut builder = Cache::builder();
        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }
        if let Some(max) = max_entries {
            builder = builder.max_capacity(max);
        }
        Self {
            name,
            inner: builder.build(),
        }
    }

    /// Return the cached value for `key`, or run `fetch` and store its result.
    /// Errors are returned as-is and never cached.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.inner.get(&key).await {
            debug!(cache = self.name, "Cache hit");
            return Ok(value);
        }

        debug!(cache = self.name, "Cache miss");
        let value = fetch().await?;
        self.inner.insert(key, value.clone()).await;
        Ok(value)
    }

    /// Drop every entry
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
        debug!(cache = self.name, "Cache cleared");
    }
}
