//! Cache Statistics Module
//!
//! Diagnostic snapshot of the response cache.

use serde::Serialize;

// == Cache Stats ==
/// Entry counts and lifetime counters of a response cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Entries currently held, expired or not
    pub total_entries: usize,
    /// Entries that would be served right now
    pub valid_entries: usize,
    /// Entries held but past their expiry, awaiting lazy removal
    pub expired_entries: usize,
    /// Configured capacity
    pub max_entries: usize,
    /// Reads answered from the cache
    pub hits: u64,
    /// Reads that found nothing usable
    pub misses: u64,
    /// Entries dropped to make room
    pub evictions: u64,
}

impl CacheStats {
    pub fn new(max_entries: usize) -> Self {
        Self {
            max_entries,
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 before any read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Fills the entry counts from the current map contents.
    pub fn set_entries(&mut self, total: usize, valid: usize) {
        self.total_entries = total;
        self.valid_entries = valid;
        self.expired_entries = total - valid;
    }
}
