//! Scripted in-memory transport for unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{HttpRequest, HttpResponse, Transport};
use crate::config::TOKEN_PATH;
use crate::error::TransportError;

type Scripted = Result<HttpResponse, TransportError>;

/// Answers token requests and resource requests from separate queues and
/// records every request it sees.
///
/// When the token queue is empty a fresh `token-N` is issued.
#[derive(Default)]
pub struct ScriptedTransport {
    tokens: Mutex<VecDeque<Scripted>>,
    resources: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<HttpRequest>>,
    issued: Mutex<u32>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_token(&self, response: Scripted) {
        self.tokens.lock().unwrap().push_back(response);
    }

    pub fn push_resource(&self, response: Scripted) {
        self.resources.lock().unwrap().push_back(response);
    }

    pub fn push_json(&self, status: u16, body: Value) {
        self.push_resource(Ok(HttpResponse::new(status, body.to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn token_calls(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.url.ends_with(TOKEN_PATH))
            .count()
    }

    pub fn resource_calls(&self) -> usize {
        self.requests().len() - self.token_calls()
    }

    /// Resource requests only, in send order.
    pub fn resource_requests(&self) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|r| !r.url.ends_with(TOKEN_PATH))
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let is_token = request.url.ends_with(TOKEN_PATH);
        self.requests.lock().unwrap().push(request);

        if is_token {
            if let Some(scripted) = self.tokens.lock().unwrap().pop_front() {
                return scripted;
            }
            let mut issued = self.issued.lock().unwrap();
            *issued += 1;
            let body = json!({"access_token": format!("token-{}", *issued), "expires_in": 1799});
            return Ok(HttpResponse::new(200, body.to_string()));
        }

        self.resources
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted resource response left")
    }
}
