//! Request Executor
//!
//! The single choke point for outbound calls. Applies the response cache to
//! cacheable GETs and the one-shot authorization retry to every call.

use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::auth::TokenStore;
use crate::cache::{CacheStats, Fingerprint, ResponseCache};
use crate::config::Config;
use crate::error::{ApiError, AuthError, ClientError, ConfigError, Result};
use crate::models::{ApiErrorBody, Params};
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

/// Status signalling an invalid or expired credential.
const UNAUTHORIZED: u16 = 401;

/// Response cache shared between the executor and diagnostic callers.
pub type SharedCache = Arc<RwLock<ResponseCache>>;

// == Request Executor ==
/// Composes the token store and response cache around a transport.
pub struct RequestExecutor {
    base_url: String,
    transport: Arc<dyn Transport>,
    tokens: Arc<TokenStore>,
    cache: Option<SharedCache>,
}

impl RequestExecutor {
    // == Constructor ==
    /// Builds an executor over the production reqwest transport.
    pub fn new(config: &Config) -> std::result::Result<Self, ClientError> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport))?)
    }

    /// Builds an executor over a caller-supplied transport.
    ///
    /// A zero cache TTL disables caching entirely.
    pub fn with_transport(
        config: &Config,
        transport: Arc<dyn Transport>,
    ) -> std::result::Result<Self, ConfigError> {
        let tokens = Arc::new(TokenStore::new(config, transport.clone())?);
        let cache = config.caching_enabled().then(|| {
            Arc::new(RwLock::new(ResponseCache::new(
                config.cache_max_entries,
                config.cache_ttl,
            )))
        });

        Ok(Self {
            base_url: config.base_url(),
            transport,
            tokens,
            cache,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token store used for every call.
    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    /// Response cache handle, absent when caching is disabled.
    pub fn cache(&self) -> Option<&SharedCache> {
        self.cache.as_ref()
    }

    pub async fn cache_stats(&self) -> Option<CacheStats> {
        match &self.cache {
            Some(cache) => Some(cache.read().await.stats()),
            None => None,
        }
    }

    pub async fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.write().await.clear();
        }
    }

    // == Execute ==
    /// Performs one logical call.
    ///
    /// Steps, in order:
    /// 1. cacheable GETs are answered from the cache when possible
    /// 2. an authenticated attempt is made
    /// 3. on 401 the credential is invalidated and the attempt repeated once;
    ///    a second 401 is an `AuthError::Rejected`
    /// 4. any other non-2xx is an `ApiError`
    /// 5. transport failures are surfaced as is
    /// 6. a successful cacheable GET is stored before returning
    ///
    /// Non-GET or non-cacheable calls never read or write the cache.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        body: Option<&Value>,
        cacheable: bool,
    ) -> Result<Value> {
        let cache_key = self.cache_key(&method, path, params, cacheable);

        if let (Some(cache), Some(key)) = (&self.cache, &cache_key) {
            if let Some(hit) = cache.write().await.get(key) {
                debug!(path, key = %key, "Cache hit");
                return Ok(hit);
            }
            debug!(path, key = %key, "Cache miss");
        }

        let url = self.url_for(path);
        let mut response = self.attempt(&method, &url, params, body).await?;

        if response.status == UNAUTHORIZED {
            warn!(%method, path, "Authorization failed, refreshing token and retrying once");
            self.tokens.invalidate().await;
            response = self.attempt(&method, &url, params, body).await?;

            if response.status == UNAUTHORIZED {
                return Err(AuthError::Rejected {
                    status: response.status,
                }
                .into());
            }
        }

        if !response.is_success() {
            let errors = ApiErrorBody::parse(&response.body).errors;
            let err = ApiError::new(response.status, errors);
            debug!(%method, path, status = response.status, error = %err, "API call rejected");
            return Err(err.into());
        }

        let value = parse_body(&response)?;

        if let (Some(cache), Some(key)) = (&self.cache, cache_key) {
            cache.write().await.set(key, value.clone(), None);
        }

        Ok(value)
    }

    /// Cacheable GET.
    pub async fn get(&self, path: &str, params: &Params) -> Result<Value> {
        self.execute(Method::GET, path, params, None, true).await
    }

    /// JSON POST. Never cached.
    pub async fn post(&self, path: &str, body: &Value, params: &Params) -> Result<Value> {
        self.execute(Method::POST, path, params, Some(body), false)
            .await
    }

    fn cache_key(
        &self,
        method: &Method,
        path: &str,
        params: &Params,
        cacheable: bool,
    ) -> Option<Fingerprint> {
        if self.cache.is_some() && cacheable && *method == Method::GET {
            Some(ResponseCache::make_key(path, params))
        } else {
            None
        }
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// One authenticated exchange: fetch a token, then send.
    async fn attempt(
        &self,
        method: &Method,
        url: &str,
        params: &Params,
        body: Option<&Value>,
    ) -> Result<HttpResponse> {
        let token = self.tokens.get_token().await?;

        let mut request = HttpRequest::new(method.clone(), url)
            .query(params.clone())
            .header("Authorization", format!("Bearer {}", token))
            .header("Accept", "application/json");
        if let Some(body) = body {
            request = request
                .header("Content-Type", "application/json")
                .json(body.clone());
        }

        Ok(self.transport.send(request).await?)
    }
}

/// Decodes a success body. An empty body decodes to `null`.
fn parse_body(response: &HttpResponse) -> Result<Value> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(response.json()?)
}
