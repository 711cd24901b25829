//! Amadeus Core - request orchestration for the Amadeus travel API
//!
//! Authenticates with OAuth2 client credentials, caches idempotent reads
//! under TTL and LRU policies, and recovers from a single authorization
//! failure per call by refreshing the token.

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod executor;
pub mod models;
pub mod transport;

pub use auth::TokenStore;
pub use cache::{CacheStats, ResponseCache};
pub use config::{Config, Environment};
pub use error::{ClientError, Result};
pub use executor::{RequestExecutor, SharedCache};
pub use models::Params;
pub use reqwest::Method;
