//! In-memory registry transport for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::client::{RawResponse, RegistryClient, RegistryTransport};
use super::endpoints::RegistryEndpoints;
use super::error::{RegistryError, RegistryResult};

pub const TEST_REGISTRY_URL: &str = "http://registry.test";

/// Transport answering from a fixed URL table; unknown URLs answer 404.
#[derive(Default)]
pub struct StubTransport {
    responses: HashMap<String, RegistryResult<RawResponse>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, url: impl Into<String>, response: RawResponse) -> Self {
        self.responses.insert(url.into(), Ok(response));
        self
    }

    pub fn with_json(self, url: impl Into<String>, body: Value) -> Self {
        self.with_response(url, RawResponse::ok(body.to_string()))
    }

    pub fn with_text(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_response(url, RawResponse::ok(body))
    }

    pub fn with_network_error(mut self, url: impl Into<String>, detail: &str) -> Self {
        self.responses
            .insert(url.into(), Err(RegistryError::network(detail)));
        self
    }

    /// Shared log of requested URLs, in order.
    pub fn request_log(&self) -> Arc<Mutex<Vec<String>>> {
        self.requests.clone()
    }

    /// Wrap into a client rooted at [`TEST_REGISTRY_URL`].
    pub fn into_client(self) -> RegistryClient {
        RegistryClient::new(
            Arc::new(self),
            RegistryEndpoints::new(TEST_REGISTRY_URL),
            "hashicorp",
        )
    }
}

#[async_trait]
impl RegistryTransport for StubTransport {
    async fn get(&self, url: &str, _accept: &str) -> RegistryResult<RawResponse> {
        self.requests.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| Ok(RawResponse::status(404, "Not Found")))
    }
}
