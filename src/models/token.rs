//! Token endpoint bodies (OAuth2 client credentials grant)

use serde::Deserialize;

/// Seconds-to-expiry assumed when the token endpoint omits `expires_in`.
pub const DEFAULT_EXPIRES_IN: i64 = 1799;

/// Successful token endpoint body.
///
/// Fields are optional so a malformed body is reported as an authorization
/// failure rather than a decode error.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl TokenResponse {
    /// Seconds until the token expires, defaulting when not declared.
    pub fn expires_in(&self) -> i64 {
        self.expires_in.unwrap_or(DEFAULT_EXPIRES_IN)
    }
}

/// Error body declared by the token endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}
