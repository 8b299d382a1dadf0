// =============================================================================
// Time-Boxed Cache — freshness-windowed payloads keyed by resource name
// =============================================================================
//
// One logical cache instance per resource kind, shared across requests.
// Entries are immutable once stored and replaced wholesale; a read within
// the freshness window returns the stored payload without recomputation.
// Concurrent misses may legitimately compute redundantly — upstream calls
// are idempotent and side-effect-free, so no single-flight deduplication is
// done. The lock is never held across an `.await`.

use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

struct CacheEntry<T> {
    payload: T,
    stored_at: Instant,
}

/// Expiring cache for cloneable payloads.
#[derive(Default)]
pub struct TimedCache<T> {
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
}

impl<T: Clone> TimedCache<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Return the fresh payload for `key`, or recompute it.
    ///
    /// A stored entry younger than `freshness_window` is returned with
    /// `cached = true` and `compute` is not invoked. Otherwise `compute`
    /// runs; on success the result is stored with the current timestamp and
    /// returned with `cached = false`. On failure the stored entry is left
    /// untouched and the error propagates — the caller maps it to its own
    /// fallback payload, never to a hard error for the end client.
    pub async fn get_or_compute<F, Fut, E>(
        &self,
        key: &str,
        freshness_window: Duration,
        compute: F,
    ) -> Result<(T, bool), E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(payload) = self.fresh(key, freshness_window) {
            return Ok((payload, true));
        }

        let payload = compute().await?;

        self.entries.write().insert(
            key.to_string(),
            CacheEntry {
                payload: payload.clone(),
                stored_at: Instant::now(),
            },
        );

        Ok((payload, false))
    }

    /// Stored payload for `key` if it is still inside the freshness window.
    fn fresh(&self, key: &str, freshness_window: Duration) -> Option<T> {
        let entries = self.entries.read();
        let entry = entries.get(key)?;
        if entry.stored_at.elapsed() < freshness_window {
            Some(entry.payload.clone())
        } else {
            None
        }
    }
}
