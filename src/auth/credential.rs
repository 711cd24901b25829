//! Bearer credential with absolute expiry

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::Instant;

use crate::config::Environment;

/// Upper bound on a declared lifetime; keeps instant arithmetic in range.
const MAX_LIFETIME: Duration = Duration::from_secs(30 * 24 * 60 * 60);

// == Credential ==
/// An access token and the instant it stops being accepted.
///
/// Constructed only from a complete token response, so a credential that
/// exists always has both fields.
#[derive(Debug, Clone)]
pub struct Credential {
    token: String,
    expires_at: Instant,
    expires_at_utc: DateTime<Utc>,
    environment: Environment,
}

impl Credential {
    pub fn new(token: String, expires_in: Duration, environment: Environment) -> Self {
        let expires_in = expires_in.min(MAX_LIFETIME);
        let expires_at_utc = Utc::now()
            + chrono::Duration::from_std(expires_in).unwrap_or_else(|_| chrono::Duration::zero());

        Self {
            token,
            expires_at: Instant::now() + expires_in,
            expires_at_utc,
            environment,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// True while `now < expiry - skew`.
    pub fn is_fresh(&self, skew: Duration) -> bool {
        Instant::now() + skew < self.expires_at
    }

    /// Time left before hard expiry, zero once expired.
    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    pub fn info(&self) -> CredentialInfo {
        CredentialInfo {
            environment: self.environment.as_str(),
            expires_at: self.expires_at_utc,
            expires_in_secs: self.remaining().as_secs(),
        }
    }
}

/// Diagnostic view of the current credential. Never includes the token.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialInfo {
    pub environment: &'static str,
    pub expires_at: DateTime<Utc>,
    pub expires_in_secs: u64,
}
