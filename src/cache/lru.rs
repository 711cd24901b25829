//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::collections::{BTreeMap, HashMap};

use super::Fingerprint;

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Every touch stamps the key with a fresh, strictly increasing tick:
/// - `ticks` maps a key to its latest tick
/// - `order` maps ticks back to keys, oldest first
///
/// Touch, remove and evict are O(log n). Order is exact, so entries touched
/// within the same clock tick still evict deterministically.
#[derive(Debug, Default)]
pub struct LruTracker {
    ticks: HashMap<Fingerprint, u64>,
    order: BTreeMap<u64, Fingerprint>,
    next_tick: u64,
}

impl LruTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently accessed.
    pub fn touch(&mut self, key: &Fingerprint) {
        let tick = self.next_tick;
        self.next_tick += 1;

        if let Some(previous) = self.ticks.insert(key.clone(), tick) {
            self.order.remove(&previous);
        }
        self.order.insert(tick, key.clone());
    }

    pub fn remove(&mut self, key: &Fingerprint) {
        if let Some(tick) = self.ticks.remove(key) {
            self.order.remove(&tick);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently accessed key.
    pub fn evict_oldest(&mut self) -> Option<Fingerprint> {
        let (_, key) = self.order.pop_first()?;
        self.ticks.remove(&key);
        Some(key)
    }

    pub fn clear(&mut self) {
        self.ticks.clear();
        self.order.clear();
    }

    #[cfg(test)]
    pub fn peek_oldest(&self) -> Option<&Fingerprint> {
        self.order.values().next()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, key: &Fingerprint) -> bool {
        self.ticks.contains_key(key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Params;

    fn key(name: &str) -> Fingerprint {
        Fingerprint::new(name, &Params::new())
    }

    #[test]
    fn test_lru_new() {
        let lru = LruTracker::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
        assert_eq!(lru.peek_oldest(), None);
    }

    #[test]
    fn test_lru_touch_existing_key() {
        let mut lru = LruTracker::new();

        lru.touch(&key("a"));
        lru.touch(&key("b"));
        lru.touch(&key("c"));
        lru.touch(&key("a"));

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.peek_oldest(), Some(&key("b")));
    }

    #[test]
    fn test_lru_evict_order() {
        let mut lru = LruTracker::new();

        // touch(a): [a]
        // touch(b): [b, a]
        // touch(c): [c, b, a]
        // touch(a): [a, c, b]
        // touch(c): [c, a, b]
        lru.touch(&key("a"));
        lru.touch(&key("b"));
        lru.touch(&key("c"));
        lru.touch(&key("a"));
        lru.touch(&key("c"));

        assert_eq!(lru.evict_oldest(), Some(key("b")));
        assert_eq!(lru.evict_oldest(), Some(key("a")));
        assert_eq!(lru.evict_oldest(), Some(key("c")));
        assert_eq!(lru.evict_oldest(), None);
        assert!(lru.is_empty());
    }

    #[test]
    fn test_lru_remove() {
        let mut lru = LruTracker::new();

        lru.touch(&key("a"));
        lru.touch(&key("b"));
        lru.remove(&key("a"));
        lru.remove(&key("missing"));

        assert_eq!(lru.len(), 1);
        assert!(!lru.contains(&key("a")));
        assert!(lru.contains(&key("b")));
        assert_eq!(lru.evict_oldest(), Some(key("b")));
    }

    #[test]
    fn test_lru_removed_key_can_return() {
        let mut lru = LruTracker::new();

        lru.touch(&key("a"));
        lru.touch(&key("b"));
        lru.remove(&key("a"));
        lru.touch(&key("a"));

        assert_eq!(lru.evict_oldest(), Some(key("b")));
        assert_eq!(lru.evict_oldest(), Some(key("a")));
    }

    #[test]
    fn test_lru_touch_same_key_multiple_times() {
        let mut lru = LruTracker::new();

        lru.touch(&key("a"));
        lru.touch(&key("a"));
        lru.touch(&key("a"));

        assert_eq!(lru.len(), 1);
        lru.clear();
        assert!(lru.is_empty());
        assert_eq!(lru.evict_oldest(), None);
    }
}
