//! Cache Entry Module
//!
//! Defines the structure for individual cached responses with TTL support.

use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

use super::MAX_TTL;

// == Cache Entry ==
/// A cached response payload with its expiry and last-access instants.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached response body
    pub value: Value,
    /// Instant after which the entry is no longer served
    pub expires_at: Instant,
    /// Instant of insertion or most recent hit
    pub last_access: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` from now, at most `MAX_TTL` ahead.
    pub fn new(value: Value, ttl: Duration) -> Self {
        let now = Instant::now();
        let ttl = ttl.min(MAX_TTL);

        Self {
            value,
            expires_at: now + ttl,
            last_access: now,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is valid only while `now < expires_at`; at the boundary it
    /// is already expired.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    // == Touch ==
    /// Records a hit.
    pub fn touch(&mut self) {
        self.last_access = Instant::now();
    }

    // == Time To Live ==
    /// Returns remaining TTL, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
