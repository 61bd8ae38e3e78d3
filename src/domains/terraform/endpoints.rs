//! URL builders for the Terraform registry APIs.
//!
//! Every endpoint is a template keyed by namespace, provider, resource,
//! module and version. Caller-supplied path segments are percent-encoded so
//! they cannot change the requested path or add a query. Nothing here
//! performs I/O.

use serde::Serialize;
use urlencoding::encode;

/// Version segment used by documentation pages when none is requested.
pub const LATEST_VERSION: &str = "latest";

/// Maximum number of hits requested from the module search API.
pub const MODULE_SEARCH_LIMIT: usize = 10;

/// Public Terraform registry.
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.terraform.io";

#[derive(Serialize)]
struct ModuleSearchQuery<'a> {
    q: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider: Option<&'a str>,
    limit: usize,
}

#[derive(Serialize)]
struct PolicySearchQuery<'a> {
    #[serde(rename = "page[size]")]
    page_size: usize,
    #[serde(rename = "filter[query]", skip_serializing_if = "Option::is_none")]
    query: Option<&'a str>,
    include: &'a str,
}

/// Registry URL templates rooted at a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEndpoints {
    base_url: String,
}

impl Default for RegistryEndpoints {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY_URL)
    }
}

impl RegistryEndpoints {
    /// Create endpoints for the given registry base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Provider version listing.
    pub fn provider_versions(&self, namespace: &str, provider: &str) -> String {
        format!(
            "{}/v1/providers/{}/{}/versions",
            self.base_url,
            encode(namespace),
            encode(provider)
        )
    }

    /// Data sources published by a provider.
    pub fn provider_data_sources(&self, namespace: &str, provider: &str) -> String {
        format!(
            "{}/v1/providers/{}/{}/data-sources",
            self.base_url,
            encode(namespace),
            encode(provider)
        )
    }

    /// Schema of a single provider resource.
    pub fn resource_schema(&self, namespace: &str, provider: &str, resource: &str) -> String {
        format!(
            "{}/v1/providers/{}/{}/resources/{}",
            self.base_url,
            encode(namespace),
            encode(provider),
            encode(resource)
        )
    }

    /// Documentation page of a resource; `slug` is the resource name without
    /// its provider prefix (`instance` for `aws_instance`).
    pub fn resource_docs_page(
        &self,
        namespace: &str,
        provider: &str,
        slug: &str,
        version: Option<&str>,
    ) -> String {
        format!(
            "{}/providers/{}/{}/{}/docs/resources/{}",
            self.base_url,
            encode(namespace),
            encode(provider),
            encode(version.unwrap_or(LATEST_VERSION)),
            encode(slug)
        )
    }

    /// Module search by free text, optionally narrowed to one provider.
    pub fn module_search(&self, query: &str, provider: Option<&str>) -> String {
        let params = ModuleSearchQuery {
            q: query,
            provider,
            limit: MODULE_SEARCH_LIMIT,
        };
        format!(
            "{}/v1/modules/search?{}",
            self.base_url,
            encode_query(&params)
        )
    }

    /// Module details; the registry serves the latest release when no version
    /// segment is present.
    pub fn module_details(
        &self,
        namespace: &str,
        name: &str,
        provider: &str,
        version: Option<&str>,
    ) -> String {
        let module = format!(
            "{}/v1/modules/{}/{}/{}",
            self.base_url,
            encode(namespace),
            encode(name),
            encode(provider)
        );
        match version {
            Some(version) => format!("{}/{}", module, encode(version)),
            None => module,
        }
    }

    /// Policy library listing.
    pub fn policy_libraries(&self, query: Option<&str>) -> String {
        let params = PolicySearchQuery {
            page_size: 100,
            query,
            include: "latest-version",
        };
        format!("{}/v2/policies?{}", self.base_url, encode_query(&params))
    }

    /// Policy library details with its latest version included.
    pub fn policy_library(&self, namespace: &str, name: &str) -> String {
        format!(
            "{}/v2/policies/{}/{}?include=latest-version",
            self.base_url,
            encode(namespace),
            encode(name)
        )
    }
}

fn encode_query<T: Serialize>(params: &T) -> String {
    // Flat structs of strings and integers always encode.
    serde_urlencoded::to_string(params).unwrap_or_default()
}
