//! Provider lookup tool.
//!
//! Lists the published versions of a provider, newest first.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::schema_for_type,
    model::{CallToolResult, JsonObject},
};
use schemars::JsonSchema;
use serde_json::Value;
use tracing::info;

use crate::domains::terraform::{RegistryClient, version};
use crate::domains::tools::definitions::common::{
    ProviderAddress, array_at, str_field, success_result,
};
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::ToolHandler;
use crate::domains::tools::params::{FieldRule, ParamTable};

/// Parameters accepted by the provider lookup tool.
#[derive(Debug, Clone, JsonSchema)]
pub struct ProviderLookupParams {
    /// Provider name, optionally namespaced.
    #[schemars(description = "Provider name, e.g. 'aws' or 'hashicorp/aws'")]
    pub provider: Option<String>,

    /// Fallback key for the provider name.
    #[schemars(description = "Alias of 'provider'")]
    pub name: Option<String>,

    #[schemars(description = "Provider namespace (default: hashicorp)")]
    pub namespace: Option<String>,

    #[schemars(description = "Check that a specific version is published")]
    pub version: Option<String>,
}

const PARAMS: ParamTable = ParamTable {
    rules: &[
        FieldRule::required("provider", &["provider", "name"]),
        FieldRule::optional("namespace", &["namespace"]),
        FieldRule::optional("version", &["version"]),
    ],
    missing: "Provider name is required",
};

/// Provider Lookup Tool implementation.
#[derive(Debug, Clone, Default)]
pub struct ProviderLookupTool;

impl ProviderLookupTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "providerLookup";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Lookup Terraform provider details. Returns the latest published version of a provider and all available versions, newest first. Accepts 'provider' (or 'name'), optionally 'namespace/provider', plus an optional 'version' to check.";
}

/// Published version strings of a provider, newest first.
pub fn extract_versions(body: &Value) -> Vec<String> {
    version::sort_descending(
        array_at(body, "/versions")
            .iter()
            .map(|entry| match entry {
                Value::String(v) => v.as_str(),
                other => str_field(other, "version"),
            }),
    )
}

fn format_versions(address: &ProviderAddress, versions: &[String], requested: Option<&str>) -> String {
    let mut text = format!("Provider {}\nlatest version is {}\n", address, versions[0]);
    if let Some(requested) = requested {
        text.push_str(&format!("requested version {requested} is available\n"));
    }
    text.push_str("\nVersions available:");
    for v in versions {
        text.push_str(&format!("\n- {v}"));
    }
    text
}

#[async_trait::async_trait]
impl ToolHandler for ProviderLookupTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn input_schema(&self) -> Arc<JsonObject> {
        schema_for_type::<ProviderLookupParams>().into()
    }

    async fn execute(
        &self,
        arguments: &JsonObject,
        client: &RegistryClient,
    ) -> ToolResult<CallToolResult> {
        let params = PARAMS.resolve(arguments)?;
        let address = ProviderAddress::resolve(
            params.value("provider"),
            params.get("namespace"),
            client.default_namespace(),
        );
        info!("Looking up provider {}", address);

        let url = client
            .endpoints()
            .provider_versions(&address.namespace, &address.name);
        let body = client
            .fetch_json(&url)
            .await
            .map_err(|e| ToolError::from_registry(e, "Provider not found"))?
            .ok_or_else(|| ToolError::not_found("Provider not found"))?;

        let versions = extract_versions(&body);
        if versions.is_empty() {
            return Err(ToolError::NoVersionsFound(address.name));
        }

        let requested = params.get("version");
        if let Some(requested) = requested {
            if !versions.iter().any(|v| v == requested) {
                return Err(ToolError::not_found(format!(
                    "Version {requested} not found for provider {address}"
                )));
            }
        }

        Ok(success_result(format_versions(&address, &versions, requested)))
    }
}
