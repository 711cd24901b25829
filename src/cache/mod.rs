//! Cache Module
//!
//! Provides in-memory response caching with TTL expiration and LRU eviction.
//! Expiry is checked lazily on read; nothing sweeps in the background.

mod entry;
mod fingerprint;
pub(crate) mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use fingerprint::Fingerprint;
pub use stats::CacheStats;
pub use store::ResponseCache;

// == Public Constants ==
/// Default TTL for cached responses
pub const DEFAULT_TTL: std::time::Duration = std::time::Duration::from_secs(900);

/// Default maximum number of cached responses
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Longest lifetime any entry is given; larger TTLs are clamped to it.
pub const MAX_TTL: std::time::Duration = std::time::Duration::from_secs(365 * 24 * 60 * 60);
