//! Configuration Module
//!
//! Handles loading and validating client configuration. Values are read once
//! at construction and never re-read.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::MAX_TTL;
use crate::error::ConfigError;

/// Path of the OAuth2 token endpoint, identical on both hosts.
pub const TOKEN_PATH: &str = "/v1/security/oauth2/token";

// == Environment ==
/// The two fixed Amadeus hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Test,
    Production,
}

impl Environment {
    /// API base URL for this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Test => "https://test.api.amadeus.com",
            Environment::Production => "https://api.amadeus.com",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "test" => Ok(Environment::Test),
            "production" => Ok(Environment::Production),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Config ==
/// Client configuration parameters.
#[derive(Clone)]
pub struct Config {
    /// OAuth2 client identity
    pub api_key: String,
    /// OAuth2 client secret
    pub api_secret: String,
    /// Which fixed host to talk to
    pub environment: Environment,
    /// Default TTL for cached responses; zero disables caching entirely
    pub cache_ttl: Duration,
    /// Maximum number of cached responses
    pub cache_max_entries: usize,
    /// Per-request transport timeout
    pub timeout: Duration,
    /// Overrides the environment's host (proxies, local mocks)
    pub base_url: Option<String>,
}

impl Config {
    /// Creates a Config with defaults for everything but the credentials.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            environment,
            cache_ttl: Duration::from_secs(900),
            cache_max_entries: 1000,
            timeout: Duration::from_secs(30),
            base_url: None,
        }
    }

    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `AMADEUS_API_KEY` - Client identity (required)
    /// - `AMADEUS_API_SECRET` - Client secret (required)
    /// - `AMADEUS_ENV` - `test` or `production` (default: test)
    /// - `AMADEUS_CACHE_TTL` - Cache TTL in seconds, 0 disables (default: 900)
    /// - `AMADEUS_CACHE_MAX_ENTRIES` - Cache capacity (default: 1000)
    /// - `AMADEUS_TIMEOUT` - Request timeout in seconds (default: 30)
    /// - `AMADEUS_BASE_URL` - Host override (default: none)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("AMADEUS_API_KEY").unwrap_or_default();
        let api_secret = env::var("AMADEUS_API_SECRET").unwrap_or_default();
        let environment = match env::var("AMADEUS_ENV") {
            Ok(value) => value.parse()?,
            Err(_) => Environment::default(),
        };

        let mut config = Self::new(api_key, api_secret, environment);
        if let Some(ttl) = parse_var::<u64>("AMADEUS_CACHE_TTL")? {
            config.cache_ttl = Duration::from_secs(ttl);
        }
        if let Some(max_entries) = parse_var::<usize>("AMADEUS_CACHE_MAX_ENTRIES")? {
            config.cache_max_entries = max_entries;
        }
        if let Some(timeout) = parse_var::<u64>("AMADEUS_TIMEOUT")? {
            config.timeout = Duration::from_secs(timeout);
        }
        config.base_url = env::var("AMADEUS_BASE_URL").ok().filter(|v| !v.is_empty());

        config.validate()?;
        Ok(config)
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_cache_max_entries(mut self, max_entries: usize) -> Self {
        self.cache_max_entries = max_entries;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Whether responses should be cached at all.
    pub fn caching_enabled(&self) -> bool {
        !self.cache_ttl.is_zero()
    }

    /// Effective API base URL, without a trailing slash.
    pub fn base_url(&self) -> String {
        self.base_url
            .as_deref()
            .unwrap_or(self.environment.base_url())
            .trim_end_matches('/')
            .to_string()
    }

    /// Full URL of the token endpoint.
    pub fn token_url(&self) -> String {
        format!("{}{}", self.base_url(), TOKEN_PATH)
    }

    /// Checks the invariants construction relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() || self.api_secret.trim().is_empty() {
            return Err(ConfigError::MissingCredentials);
        }
        if self.cache_ttl > MAX_TTL {
            return Err(ConfigError::InvalidValue {
                var: "AMADEUS_CACHE_TTL",
                value: self.cache_ttl.as_secs().to_string(),
            });
        }
        if self.caching_enabled() && self.cache_max_entries == 0 {
            return Err(ConfigError::InvalidValue {
                var: "AMADEUS_CACHE_MAX_ENTRIES",
                value: "0".to_string(),
            });
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                var: "AMADEUS_TIMEOUT",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("environment", &self.environment)
            .field("cache_ttl", &self.cache_ttl)
            .field("cache_max_entries", &self.cache_max_entries)
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn parse_var<T: FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value }),
        Err(_) => Ok(None),
    }
}
