//! Response cache
//!
//! Memoizes computed post responses keyed by the exact request tuple.
//! No per-entry expiry and no size eviction - the whole table is flushed
//! at once, either by the scheduled background task or on demand through
//! the admin surface.
//!
//! Thread-safe via DashMap; reads and computes for different keys never
//! block each other. Concurrent misses for the same key are coalesced
//! behind a per-key async gate so the compute runs once under load.
//! A task that loses the narrow race between gate teardown and entry
//! insertion may recompute; that at-least-once window is accepted.

use dashmap::DashMap;
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::cache::keys::RequestKey;
use crate::types::{Post, Result};

/// Cache statistics, served by `/status`
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    /// Number of cached entries
    pub entries: usize,
    /// Cache hit count
    pub hits: u64,
    /// Cache miss count
    pub misses: u64,
    /// Hit rate percentage
    pub hit_rate: f64,
    /// Number of full flushes since startup
    pub flushes: u64,
}

/// In-memory response cache with wholesale invalidation
pub struct ResponseCache {
    entries: DashMap<RequestKey, Arc<Vec<Post>>>,
    in_flight: DashMap<RequestKey, Arc<Mutex<()>>>,
    hits: AtomicU64,
    misses: AtomicU64,
    flushes: AtomicU64,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            in_flight: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            flushes: AtomicU64::new(0),
        }
    }

    /// Return the cached response for `key`, or run `compute` and store
    /// its result.
    ///
    /// A failed compute is never stored - the next request for the same
    /// key computes again.
    pub async fn get_or_compute<F, Fut>(&self, key: RequestKey, compute: F) -> Result<Arc<Vec<Post>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Post>>>,
    {
        if let Some(entry) = self.entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "Response cache hit");
            return Ok(Arc::clone(entry.value()));
        }

        let gate = Arc::clone(
            self.in_flight
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        );
        let _held = gate.lock().await;

        // Another task may have filled the entry while we waited on the gate
        if let Some(entry) = self.entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "Response cache hit after wait");
            return Ok(Arc::clone(entry.value()));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(key = %key, "Response cache miss, computing");

        match compute().await {
            Ok(posts) => {
                let value = Arc::new(posts);
                self.entries.insert(key.clone(), Arc::clone(&value));
                self.in_flight.remove(&key);
                Ok(value)
            }
            Err(e) => {
                self.in_flight.remove(&key);
                Err(e)
            }
        }
    }

    /// Clear every entry at once.
    ///
    /// In-flight computations past the miss point are not affected; they
    /// insert into the fresh table when they finish. Returns the number
    /// of entries dropped.
    pub fn invalidate_all(&self) -> usize {
        let cleared = self.entries.len();
        self.entries.clear();
        self.flushes.fetch_add(1, Ordering::Relaxed);
        info!(entries_cleared = cleared, "Response cache flushed");
        cleared
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            entries: self.entries.len(),
            hits,
            misses,
            hit_rate,
            flushes: self.flushes.load(Ordering::Relaxed),
        }
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Background Flush Task
// ============================================================================

/// Schedule for the background flush task
#[derive(Debug, Clone)]
pub struct FlushSchedule {
    /// Seconds between flushes
    pub interval: Duration,
    /// Delay the first flush until the next UTC midnight
    pub align_midnight: bool,
}

/// Time until the next UTC midnight, used to align the daily flush
fn until_next_utc_midnight(now: chrono::DateTime<chrono::Utc>) -> Duration {
    let next = (now.date_naive() + chrono::Days::new(1)).and_time(chrono::NaiveTime::MIN);
    (next.and_utc() - now)
        .to_std()
        .unwrap_or(Duration::from_secs(86_400))
}

/// Spawn a background task that flushes the whole cache on a fixed
/// schedule, aligned to UTC midnight by default.
pub fn spawn_flush_task(cache: Arc<ResponseCache>, schedule: FlushSchedule) {
    info!(
        interval_secs = schedule.interval.as_secs(),
        align_midnight = schedule.align_midnight,
        "Cache flush task started"
    );

    tokio::spawn(async move {
        if schedule.align_midnight {
            let delay = until_next_utc_midnight(chrono::Utc::now());
            debug!(delay_secs = delay.as_secs(), "First cache flush aligned to UTC midnight");
            tokio::time::sleep(delay).await;
            cache.invalidate_all();
        }

        loop {
            tokio::time::sleep(schedule.interval).await;
            cache.invalidate_all();
        }
    });
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::query::{SortDirection, SortField};
    use chrono::TimeZone;
    use tokio_test::assert_ok;

    fn key(tags: &str) -> RequestKey {
        RequestKey::new(tags, SortField::Id, SortDirection::Asc)
    }

    fn posts(ids: &[u64]) -> Vec<Post> {
        ids.iter()
            .map(|&id| Post {
                id,
                author: String::new(),
                author_id: id,
                likes: 0,
                popularity: 0.0,
                reads: 0,
                tags: vec![],
            })
            .collect()
    }

    #[tokio::test]
    async fn test_computes_once_then_serves_hits() {
        let cache = ResponseCache::new();
        let computed = AtomicU64::new(0);

        for _ in 0..3 {
            let result = cache
                .get_or_compute(key("tech"), || async {
                    computed.fetch_add(1, Ordering::SeqCst);
                    Ok(posts(&[1, 2]))
                })
                .await
                .unwrap();
            assert_eq!(result.len(), 2);
        }

        assert_eq!(computed.load(Ordering::SeqCst), 1);
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 2);
    }

    #[tokio::test]
    async fn test_hit_returns_shared_collection() {
        let cache = ResponseCache::new();

        let first = cache
            .get_or_compute(key("tech"), || async { Ok(posts(&[1])) })
            .await
            .unwrap();
        let second = cache
            .get_or_compute(key("tech"), || async { Ok(posts(&[99])) })
            .await
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_distinct_keys_compute_separately() {
        let cache = ResponseCache::new();

        cache
            .get_or_compute(key("a,b"), || async { Ok(posts(&[1])) })
            .await
            .unwrap();
        let swapped = cache
            .get_or_compute(key("b,a"), || async { Ok(posts(&[2])) })
            .await
            .unwrap();

        assert_eq!(swapped[0].id, 2);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_compute_is_not_cached() {
        let cache = ResponseCache::new();
        let attempts = AtomicU64::new(0);

        let first = cache
            .get_or_compute(key("tech"), || async {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(crate::types::GatewayError::UpstreamFetch {
                    tag: "tech".to_string(),
                    reason: "boom".to_string(),
                })
            })
            .await;
        assert!(first.is_err());
        assert!(cache.is_empty());

        let second = cache
            .get_or_compute(key("tech"), || async {
                attempts.fetch_add(1, Ordering::SeqCst);
                Ok(posts(&[1]))
            })
            .await;
        assert_ok!(second);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_same_key_misses_coalesce() {
        let cache = Arc::new(ResponseCache::new());
        let computed = Arc::new(AtomicU64::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            let computed = Arc::clone(&computed);
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_compute(key("tech"), || async move {
                        computed.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Ok(posts(&[1]))
                    })
                    .await
            }));
        }

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
        assert_eq!(computed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidate_all_clears_entries() {
        let cache = ResponseCache::new();

        cache
            .get_or_compute(key("a"), || async { Ok(posts(&[1])) })
            .await
            .unwrap();
        cache
            .get_or_compute(key("b"), || async { Ok(posts(&[2])) })
            .await
            .unwrap();
        assert_eq!(cache.len(), 2);

        let cleared = cache.invalidate_all();
        assert_eq!(cleared, 2);
        assert!(cache.is_empty());
        assert_eq!(cache.stats().flushes, 1);

        // Next identical request recomputes
        let recomputed = AtomicU64::new(0);
        cache
            .get_or_compute(key("a"), || async {
                recomputed.fetch_add(1, Ordering::SeqCst);
                Ok(posts(&[1]))
            })
            .await
            .unwrap();
        assert_eq!(recomputed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_stats_hit_rate() {
        let cache = ResponseCache::new();
        assert_eq!(cache.stats().hit_rate, 0.0);

        cache.hits.store(3, Ordering::Relaxed);
        cache.misses.store(1, Ordering::Relaxed);
        assert_eq!(cache.stats().hit_rate, 75.0);
    }

    #[test]
    fn test_until_next_utc_midnight() {
        let now = chrono::Utc.with_ymd_and_hms(2024, 3, 10, 23, 0, 0).unwrap();
        assert_eq!(until_next_utc_midnight(now), Duration::from_secs(3600));

        let just_after = chrono::Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 1).unwrap();
        assert_eq!(
            until_next_utc_midnight(just_after),
            Duration::from_secs(86_399)
        );
    }
}
