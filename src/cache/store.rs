//! Response Cache Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and lazy TTL
//! expiration.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::cache::lru::LruTracker;
use crate::cache::{CacheEntry, CacheStats, Fingerprint};
use crate::models::Params;

// == Response Cache ==
/// Bounded response cache with LRU eviction and per-entry TTL.
///
/// Callers never borrow into the map; reads hand out clones.
#[derive(Debug)]
pub struct ResponseCache {
    /// Fingerprint to entry storage
    entries: HashMap<Fingerprint, CacheEntry>,
    /// Access-order tracker
    lru: LruTracker,
    /// Hit/miss/eviction counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL for entries inserted without an explicit one
    default_ttl: Duration,
}

impl ResponseCache {
    // == Constructor ==
    /// Creates a new cache with specified capacity and default TTL.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        let max_entries = max_entries.max(1);

        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(max_entries),
            max_entries,
            default_ttl,
        }
    }

    // == Make Key ==
    /// Computes the fingerprint of an endpoint and its parameters.
    pub fn make_key(endpoint: &str, params: &Params) -> Fingerprint {
        Fingerprint::new(endpoint, params)
    }

    // == Get ==
    /// Returns a copy of the cached value if present and unexpired.
    ///
    /// An expired entry is removed on the spot. A hit refreshes the entry's
    /// last-access instant.
    pub fn get(&mut self, key: &Fingerprint) -> Option<Value> {
        let Some(entry) = self.entries.get_mut(key) else {
            self.stats.record_miss();
            return None;
        };

        if entry.is_expired() {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_miss();
            debug!(key = %key, "Cache entry expired");
            return None;
        }

        entry.touch();
        let value = entry.value.clone();
        self.lru.touch(key);
        self.stats.record_hit();
        Some(value)
    }

    // == Set ==
    /// Stores a value, expiring `ttl` (or the default TTL) from now.
    ///
    /// Inserting a new key into a full cache first evicts the least recently
    /// accessed entry. Overwriting an existing key evicts nothing.
    pub fn set(&mut self, key: Fingerprint, value: Value, ttl: Option<Duration>) {
        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            if let Some(evicted) = self.lru.evict_oldest() {
                if let Some(entry) = self.entries.remove(&evicted) {
                    self.stats.record_eviction();
                    debug!(
                        key = %evicted,
                        idle = ?entry.last_access.elapsed(),
                        "Evicted least recently used entry"
                    );
                }
            }
        }

        let ttl = ttl.unwrap_or(self.default_ttl);
        self.entries.insert(key.clone(), CacheEntry::new(value, ttl));
        self.lru.touch(&key);
    }

    // == Clear ==
    /// Removes every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
    }

    // == Stats ==
    /// Returns a snapshot of entry counts and counters. No side effects.
    pub fn stats(&self) -> CacheStats {
        let valid = self
            .entries
            .values()
            .filter(|entry| !entry.is_expired())
            .count();

        let mut stats = self.stats.clone();
        stats.set_entries(self.entries.len(), valid);
        stats
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    #[cfg(test)]
    pub fn contains(&self, key: &Fingerprint) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
