//! Registry client adapter.
//!
//! Wraps the HTTP collaborator behind [`RegistryTransport`] and classifies
//! each outcome into a [`RegistryResult`]. Only one attempt is made per call.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::endpoints::RegistryEndpoints;
use super::error::{RegistryError, RegistryResult};
use crate::core::config::RegistryConfig;

const ACCEPT_JSON: &str = "application/json";
const ACCEPT_TEXT: &str = "text/html, text/markdown;q=0.9, */*;q=0.8";

/// Raw response handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl RawResponse {
    /// A 200 response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            body: body.into(),
        }
    }

    /// A bodiless response with the given status.
    pub fn status(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The HTTP collaborator used to reach the registry.
///
/// Implementations only report transport-level failures as errors; any
/// received response, whatever its status, is returned as `Ok`.
#[async_trait]
pub trait RegistryTransport: Send + Sync {
    async fn get(&self, url: &str, accept: &str) -> RegistryResult<RawResponse>;
}

/// [`RegistryTransport`] backed by `reqwest`.
pub struct HttpRegistryTransport {
    client: reqwest::Client,
}

impl HttpRegistryTransport {
    /// Build a transport with the configured timeout and user agent.
    pub fn new(config: &RegistryConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RegistryTransport for HttpRegistryTransport {
    async fn get(&self, url: &str, accept: &str) -> RegistryResult<RawResponse> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, accept)
            .send()
            .await
            .map_err(|e| RegistryError::network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RegistryError::network(e.to_string()))?;

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

/// Registry client: endpoint templates plus outcome classification.
#[derive(Clone)]
pub struct RegistryClient {
    transport: Arc<dyn RegistryTransport>,
    endpoints: RegistryEndpoints,
    default_namespace: String,
}

impl RegistryClient {
    pub fn new(
        transport: Arc<dyn RegistryTransport>,
        endpoints: RegistryEndpoints,
        default_namespace: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            endpoints,
            default_namespace: default_namespace.into(),
        }
    }

    /// Build a client for the configured registry using the given transport.
    pub fn from_config(config: &RegistryConfig, transport: Arc<dyn RegistryTransport>) -> Self {
        Self::new(
            transport,
            RegistryEndpoints::new(config.base_url.clone()),
            config.default_namespace.clone(),
        )
    }

    pub fn endpoints(&self) -> &RegistryEndpoints {
        &self.endpoints
    }

    /// Namespace assumed when a request names none.
    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    /// Fetch a JSON document.
    ///
    /// A success response whose body is empty or not JSON yields `Ok(None)`;
    /// callers decide how that maps onto their own "not found" wording.
    pub async fn fetch_json(&self, url: &str) -> RegistryResult<Option<Value>> {
        let body = self.fetch(url, ACCEPT_JSON).await?;
        if body.trim().is_empty() {
            debug!("Empty JSON body from {}", url);
            return Ok(None);
        }
        match serde_json::from_str(&body) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                debug!("Unparseable JSON body from {}: {}", url, e);
                Ok(None)
            }
        }
    }

    /// Fetch a text document (HTML or markdown).
    pub async fn fetch_text(&self, url: &str) -> RegistryResult<String> {
        self.fetch(url, ACCEPT_TEXT).await
    }

    async fn fetch(&self, url: &str, accept: &str) -> RegistryResult<String> {
        debug!("GET {}", url);
        let response = self.transport.get(url, accept).await.inspect_err(|e| {
            warn!("Registry request to {} failed: {}", url, e);
        })?;

        if response.is_success() {
            return Ok(response.body);
        }

        warn!(
            "Registry returned {} {} for {}",
            response.status, response.status_text, url
        );
        if response.status == 404 {
            Err(RegistryError::NotFound {
                url: url.to_string(),
            })
        } else {
            Err(RegistryError::Http {
                status: response.status,
                status_text: response.status_text,
            })
        }
    }
}
