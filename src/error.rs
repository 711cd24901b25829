//! Error types for the request core
//!
//! Every failure surfaced to callers is one of four kinds, never coerced into
//! one another: configuration, authorization, upstream API, or transport.

use serde_json::{json, Value};
use thiserror::Error;

use crate::models::ApiErrorDetail;

// == Client Error Enum ==
/// Tagged error union returned by every public operation.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Raised at construction, never from a call path
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Credential could not be obtained, or was rejected twice
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Upstream rejected the call
    #[error(transparent)]
    Api(#[from] ApiError),

    /// No usable response was obtained
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ClientError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::Config(_) => "configuration_error",
            ClientError::Auth(_) => "auth_failure",
            ClientError::Api(_) => "api_error",
            ClientError::Transport(_) => "transport_failure",
        }
    }

    /// Renders the error as a structured JSON payload.
    ///
    /// API errors additionally carry the upstream status and sub-errors so
    /// callers can echo upstream detail strings.
    pub fn to_payload(&self) -> Value {
        let mut error = json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });

        match self {
            ClientError::Api(api) => {
                error["status"] = json!(api.status);
                error["errors"] = json!(api.errors);
            }
            ClientError::Auth(AuthError::TokenRequest { status, .. })
            | ClientError::Auth(AuthError::Rejected { status }) => {
                error["status"] = json!(status);
            }
            _ => {}
        }

        json!({ "error": error })
    }
}

// == Configuration Errors ==
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "Amadeus credentials not configured. Set AMADEUS_API_KEY and AMADEUS_API_SECRET environment variables."
    )]
    MissingCredentials,

    #[error("Invalid environment: {0}. Must be 'test' or 'production'.")]
    UnknownEnvironment(String),

    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

// == Authorization Errors ==
#[derive(Error, Debug)]
pub enum AuthError {
    /// Token endpoint answered with a non-success status
    #[error("Token request failed: {status}{}", describe(.description))]
    TokenRequest {
        status: u16,
        description: Option<String>,
    },

    /// Token endpoint answered 2xx but the body was unusable
    #[error("Invalid token response: {0}")]
    InvalidTokenResponse(String),

    /// Token endpoint could not be reached
    #[error("Token request failed: {0}")]
    Transport(#[source] TransportError),

    /// A freshly refreshed credential was rejected again
    #[error("Credential rejected after refresh (status {status})")]
    Rejected { status: u16 },
}

fn describe(description: &Option<String>) -> String {
    match description {
        Some(d) => format!(" - {}", d),
        None => String::new(),
    }
}

// == API Errors ==
/// Upstream rejected the call with a client or server error.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct ApiError {
    pub status: u16,
    pub errors: Vec<ApiErrorDetail>,
    message: String,
}

impl ApiError {
    pub fn new(status: u16, errors: Vec<ApiErrorDetail>) -> Self {
        let mut message = format!("API error: {}", status);
        let details: Vec<&str> = errors
            .iter()
            .map(ApiErrorDetail::summary)
            .filter(|s| !s.is_empty())
            .collect();
        if !details.is_empty() {
            message = format!("{} - {}", message, details.join("; "));
        }

        Self {
            status,
            errors,
            message,
        }
    }
}

// == Transport Errors ==
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out")]
    Timeout,

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("request failed: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else if err.is_decode() || err.is_body() {
            TransportError::Decode(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the request core.
pub type Result<T> = std::result::Result<T, ClientError>;
