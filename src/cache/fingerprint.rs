//! Request fingerprints used as cache keys

use std::fmt;

use serde_json::json;
use sha2::{Digest, Sha256};

use crate::models::Params;

/// Number of hex characters kept from the SHA-256 digest.
const FINGERPRINT_LEN: usize = 16;

/// Deterministic digest of an endpoint path and its parameters.
///
/// The digest is taken over canonical JSON (`{"endpoint": .., "params": {..}}`
/// with keys sorted), so equal parameter sets always collide regardless of
/// how they were built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn new(endpoint: &str, params: &Params) -> Self {
        let canonical = json!({
            "endpoint": endpoint,
            "params": params,
        })
        .to_string();

        let digest = Sha256::digest(canonical.as_bytes());
        let mut hex = format!("{:x}", digest);
        hex.truncate(FINGERPRINT_LEN);
        Self(hex)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
