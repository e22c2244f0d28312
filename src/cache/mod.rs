//! Caching of compliance results per question.
//!
//! Repeated questions within the TTL skip the round-trip to the compliance
//! API. Keys ignore case and whitespace differences.

use crate::api::ComplianceResult;

use lru::LruCache;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// An LRU cache of results keyed by question.
pub struct ResultCache {
    entries: Mutex<LruCache<String, CachedResult>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

struct CachedResult {
    result: ComplianceResult,
    expires_at: Instant,
}

impl ResultCache {
    /// Create a new result cache.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Get the cached result for a question.
    pub fn get(&self, question: &str) -> Option<ComplianceResult> {
        let key = compute_key(question);
        let mut entries = self.entries.lock();

        if let Some(cached) = entries.get(&key) {
            if cached.expires_at > Instant::now() {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(cached.result.clone());
            }
            entries.pop(&key);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Cache the result for a question.
    pub fn put(&self, question: &str, result: &ComplianceResult) {
        let cached = CachedResult {
            result: result.clone(),
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.lock().put(compute_key(question), cached);
    }

    /// Clear all cached entries.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Get cache statistics.
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
            hits,
            misses,
            size: self.entries.lock().len(),
            hit_rate,
        }
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Current cache size
    pub size: usize,
    /// Hit rate percentage
    pub hit_rate: f64,
}

fn compute_key(question: &str) -> String {
    let normalized = question
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    blake3::hash(normalized.as_bytes()).to_hex().to_string()
}
