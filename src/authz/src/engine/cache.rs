//! Decision cache bound to an actor snapshot

use dashmap::DashMap;
use hrm_core::Role;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use crate::scope::Scope;
use crate::types::{Action, Resource};

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries in the cache
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 4_096 }
    }
}

/// Cache key, everything an evaluation depends on besides the table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub role: Role,
    pub resource: Resource,
    pub action: Action,
    pub scope: Scope,
}

/// Memoized allow/deny results
///
/// Entries are only valid for one actor snapshot. Callers pass the
/// provider's snapshot version to [`DecisionCache::sync_version`] before
/// each lookup; a different version empties the cache.
pub struct DecisionCache {
    entries: DashMap<CacheKey, bool>,

    /// Snapshot version the entries were computed under
    version: AtomicU64,

    config: CacheConfig,

    stats: DashMap<&'static str, usize>,
}

impl DecisionCache {
    /// Create a new decision cache
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            version: AtomicU64::new(0),
            config,
            stats: DashMap::new(),
        }
    }

    /// Drop every entry if the actor snapshot moved since the last call
    pub fn sync_version(&self, version: u64) {
        let previous = self.version.swap(version, Ordering::AcqRel);
        if previous != version {
            debug!(
                "Actor snapshot changed ({} -> {}), clearing decision cache",
                previous, version
            );
            self.entries.clear();
            self.increment_stat("invalidations");
        }
    }

    /// Get a cached result
    pub fn get(&self, key: &CacheKey) -> Option<bool> {
        match self.entries.get(key) {
            Some(entry) => {
                self.increment_stat("hits");
                Some(*entry)
            }
            None => {
                self.increment_stat("misses");
                None
            }
        }
    }

    /// Store a result; a zero-capacity cache stores nothing
    pub fn put(&self, key: CacheKey, allowed: bool) {
        if self.config.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.config.capacity {
            self.evict();
        }
        self.entries.insert(key, allowed);
    }

    /// Clear the entire cache
    pub fn clear(&self) {
        self.entries.clear();
        self.increment_stat("invalidations");
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.get_stat("hits"),
            misses: self.get_stat("misses"),
            invalidations: self.get_stat("invalidations"),
            entries: self.entries.len(),
            max_entries: self.config.capacity,
        }
    }

    /// Remove roughly a tenth of the entries
    fn evict(&self) {
        let to_remove = (self.config.capacity / 10).max(1);
        let mut removed = 0;

        self.entries.retain(|_, _| {
            if removed < to_remove {
                removed += 1;
                false
            } else {
                true
            }
        });
    }

    fn increment_stat(&self, key: &'static str) {
        *self.stats.entry(key).or_insert(0) += 1;
    }

    fn get_stat(&self, key: &'static str) -> usize {
        self.stats.get(key).map(|v| *v).unwrap_or(0)
    }
}

/// Cache statistics
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub invalidations: usize,
    pub entries: usize,
    pub max_entries: usize,
}

impl CacheStats {
    /// Calculate cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
