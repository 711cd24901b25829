//! Token Store Module
//!
//! Owns the single bearer credential for one environment and refreshes it
//! through the OAuth2 client-credentials grant.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::{Credential, CredentialInfo};
use crate::config::{Config, Environment};
use crate::error::{AuthError, ConfigError};
use crate::models::{TokenErrorResponse, TokenResponse};
use crate::transport::{HttpRequest, HttpResponse, Transport};

/// Safety buffer subtracted from a credential's expiry.
pub const TOKEN_EXPIRY_SKEW: Duration = Duration::from_secs(60);

// == Token Stats ==
/// Refresh and invalidation counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TokenStats {
    /// Successful token endpoint exchanges
    pub refreshes: u64,
    /// Failed token endpoint exchanges
    pub refresh_failures: u64,
    /// Explicit invalidations
    pub invalidations: u64,
}

#[derive(Debug, Default)]
struct TokenState {
    credential: Option<Credential>,
    stats: TokenStats,
}

// == Token Store ==
/// Produces a usable bearer token for every outbound call.
///
/// The state lock is held across the refresh exchange, so at most one
/// refresh is in flight and readers see either the old credential or the
/// complete new one.
pub struct TokenStore {
    transport: Arc<dyn Transport>,
    api_key: String,
    api_secret: String,
    environment: Environment,
    token_url: String,
    state: Mutex<TokenState>,
}

impl TokenStore {
    // == Constructor ==
    /// Creates a store for the configured identity and environment.
    ///
    /// Missing identity or secret is rejected here rather than on first use.
    pub fn new(config: &Config, transport: Arc<dyn Transport>) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            transport,
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            environment: config.environment,
            token_url: config.token_url(),
            state: Mutex::new(TokenState::default()),
        })
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    // == Get Token ==
    /// Returns the current token while it is fresh under the skew rule,
    /// otherwise refreshes first.
    ///
    /// A token just obtained from the endpoint is returned as is, even if its
    /// declared lifetime is shorter than the skew.
    pub async fn get_token(&self) -> Result<String, AuthError> {
        let mut state = self.state.lock().await;

        if let Some(credential) = &state.credential {
            if credential.is_fresh(TOKEN_EXPIRY_SKEW) {
                debug!("Reusing cached access token");
                return Ok(credential.token().to_string());
            }
            debug!("Access token within expiry skew, refreshing");
        }

        self.refresh_locked(&mut state).await
    }

    // == Refresh ==
    /// Unconditionally exchanges the client credentials for a new token.
    ///
    /// On failure the previous credential, stale or not, is left in place.
    pub async fn refresh(&self) -> Result<String, AuthError> {
        let mut state = self.state.lock().await;
        self.refresh_locked(&mut state).await
    }

    // == Invalidate ==
    /// Discards the current credential so the next `get_token` refreshes.
    pub async fn invalidate(&self) {
        let mut state = self.state.lock().await;
        state.credential = None;
        state.stats.invalidations += 1;
        debug!("Access token invalidated");
    }

    pub async fn stats(&self) -> TokenStats {
        self.state.lock().await.stats
    }

    /// Expiry details of the current credential, if one is held.
    pub async fn credential_info(&self) -> Option<CredentialInfo> {
        self.state
            .lock()
            .await
            .credential
            .as_ref()
            .map(Credential::info)
    }

    async fn refresh_locked(&self, state: &mut TokenState) -> Result<String, AuthError> {
        match self.request_token().await {
            Ok(credential) => {
                let token = credential.token().to_string();
                state.credential = Some(credential);
                state.stats.refreshes += 1;
                Ok(token)
            }
            Err(err) => {
                state.stats.refresh_failures += 1;
                warn!(environment = %self.environment, error = %err, "Token refresh failed");
                Err(err)
            }
        }
    }

    async fn request_token(&self) -> Result<Credential, AuthError> {
        let request = HttpRequest::new(Method::POST, self.token_url.as_str())
            .header("Accept", "application/json")
            .form([
                ("grant_type", "client_credentials"),
                ("client_id", self.api_key.as_str()),
                ("client_secret", self.api_secret.as_str()),
            ]);

        let response = self
            .transport
            .send(request)
            .await
            .map_err(AuthError::Transport)?;

        if !response.is_success() {
            return Err(declared_error(&response));
        }

        let parsed: TokenResponse = response
            .json()
            .map_err(|e| AuthError::InvalidTokenResponse(e.to_string()))?;

        let token = match parsed.access_token.as_deref() {
            Some(token) if !token.is_empty() => token.to_string(),
            _ => {
                let declared = declared_error(&response);
                return match declared {
                    AuthError::TokenRequest {
                        description: Some(_),
                        ..
                    } => Err(declared),
                    _ => Err(AuthError::InvalidTokenResponse(
                        "missing access_token".to_string(),
                    )),
                };
            }
        };

        let expires_in = parsed.expires_in();
        if expires_in <= 0 {
            return Err(AuthError::InvalidTokenResponse(format!(
                "non-positive expires_in: {}",
                expires_in
            )));
        }

        info!(
            environment = %self.environment,
            expires_in,
            "Obtained access token"
        );

        Ok(Credential::new(
            token,
            Duration::from_secs(expires_in as u64),
            self.environment,
        ))
    }
}

/// Builds the error a token endpoint declared in its body, if any.
fn declared_error(response: &HttpResponse) -> AuthError {
    let declared: TokenErrorResponse = response.json().unwrap_or_default();

    AuthError::TokenRequest {
        status: response.status,
        description: declared.error_description.or(declared.error),
    }
}
