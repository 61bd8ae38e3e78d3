//! Resource usage tool.
//!
//! Fetches a resource's documentation page and returns the usage example
//! found under its "Example Usage" heading, plus other resources the
//! example section mentions.

use std::sync::Arc;

use regex::Regex;
use rmcp::{
    handler::server::tool::schema_for_type,
    model::{CallToolResult, JsonObject},
};
use schemars::JsonSchema;
use tracing::{debug, info};

use crate::domains::terraform::{Example, ExampleExtraction, RegistryClient, extract_example};
use crate::domains::tools::definitions::common::{ProviderAddress, success_result};
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::ToolHandler;
use crate::domains::tools::params::{FieldRule, ParamTable};

/// Upper bound on related resource names listed.
const MAX_RELATED: usize = 10;

/// Parameters accepted by the resource usage tool.
#[derive(Debug, Clone, JsonSchema)]
pub struct ResourceUsageParams {
    #[schemars(description = "Provider name, e.g. 'aws' or 'hashicorp/aws'")]
    pub provider: Option<String>,

    #[schemars(description = "Resource name, e.g. 'aws_instance' (or 'instance')")]
    pub resource: Option<String>,

    /// Fallback key for the resource name.
    #[schemars(description = "Alias of 'resource'")]
    pub name: Option<String>,

    #[schemars(description = "Provider namespace (default: hashicorp)")]
    pub namespace: Option<String>,

    #[schemars(description = "Provider version of the documentation (default: latest)")]
    pub version: Option<String>,
}

const PARAMS: ParamTable = ParamTable {
    rules: &[
        FieldRule::required("provider", &["provider"]),
        FieldRule::required("resource", &["resource", "name"]),
        FieldRule::optional("namespace", &["namespace"]),
        FieldRule::optional("version", &["version"]),
    ],
    missing: "Both provider and resource name are required",
};

/// A resource type resolved against its owning provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedResource {
    /// Full type name, e.g. `aws_instance`.
    pub name: String,
    /// Type prefix shared by the provider's resources, e.g. `aws`.
    pub prefix: String,
    /// Documentation slug, e.g. `instance`.
    pub slug: String,
}

impl QualifiedResource {
    /// Qualify `resource` with the provider's type prefix when it lacks it.
    ///
    /// The prefix is the provider name up to its first `-`, so `google-beta`
    /// resources resolve to `google_*`.
    pub fn new(provider: &str, resource: &str) -> Self {
        let prefix = provider.split('-').next().unwrap_or(provider).to_string();
        let marker = format!("{prefix}_");
        let name = if resource.starts_with(&marker) {
            resource.to_string()
        } else {
            format!("{marker}{resource}")
        };
        let slug = name[marker.len()..].to_string();
        Self { name, prefix, slug }
    }
}

/// Other resources of the same provider mentioned in the example section,
/// in order of first appearance.
pub fn related_resources(example: &Example, resource: &QualifiedResource) -> Vec<String> {
    let pattern = format!(r"\b{}_[a-z0-9_]+\b", regex::escape(&resource.prefix));
    let Ok(names) = Regex::new(&pattern) else {
        return Vec::new();
    };

    let mut related: Vec<String> = Vec::new();
    for haystack in [example.code.as_str(), example.section.as_str()] {
        for found in names.find_iter(haystack) {
            let name = found.as_str();
            if name != resource.name && !related.iter().any(|r| r == name) {
                related.push(name.to_string());
            }
        }
    }
    related.truncate(MAX_RELATED);
    related
}

fn format_example(resource: &QualifiedResource, example: &Example, related: &[String]) -> String {
    let mut text = format!(
        "Example usage for {}:\n\n```terraform\n{}\n```",
        resource.name, example.code
    );
    if !related.is_empty() {
        text.push_str(&format!("\n\nRelated resources: {}", related.join(", ")));
    }
    text
}

/// Resource Usage Tool implementation.
#[derive(Debug, Clone, Default)]
pub struct ResourceUsageTool;

impl ResourceUsageTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "resourceUsage";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get example usage of Terraform resources. Fetches the resource documentation page and returns the example configuration under its 'Example Usage' heading, along with related resources used in the example. Requires 'provider' and 'resource' (or 'name').";
}

#[async_trait::async_trait]
impl ToolHandler for ResourceUsageTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn input_schema(&self) -> Arc<JsonObject> {
        schema_for_type::<ResourceUsageParams>().into()
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
        let resource = QualifiedResource::new(&address.name, params.value("resource"));
        info!("Fetching usage example for {} ({})", resource.name, address);

        let url = client.endpoints().resource_docs_page(
            &address.namespace,
            &address.name,
            &resource.slug,
            params.get("version"),
        );
        let page = client.fetch_text(&url).await.map_err(|e| {
            ToolError::from_registry(
                e,
                format!("Resource documentation not found for {}", resource.name),
            )
        })?;

        match extract_example(&page) {
            ExampleExtraction::Found(example) => {
                let related = related_resources(&example, &resource);
                debug!("Related resources for {}: {:?}", resource.name, related);
                Ok(success_result(format_example(&resource, &example, &related)))
            }
            ExampleExtraction::NotFound => Ok(success_result(format!(
                "No example usage found for {}",
                resource.name
            ))),
        }
    }
}
