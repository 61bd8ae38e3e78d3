//! Resource argument details tool.
//!
//! Reads a resource schema and returns its attributes as JSON text.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::schema_for_type,
    model::{CallToolResult, JsonObject},
};
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::domains::terraform::RegistryClient;
use crate::domains::tools::definitions::common::{json_result, str_field};
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::ToolHandler;
use crate::domains::tools::params::{FieldRule, ParamTable};

/// Parameters accepted by the resource argument details tool.
#[derive(Debug, Clone, JsonSchema)]
pub struct ResourceArgumentDetailsParams {
    #[schemars(description = "Provider name, e.g. 'aws'")]
    pub provider: String,

    #[schemars(description = "Provider namespace, e.g. 'hashicorp'")]
    pub namespace: String,

    #[schemars(description = "Resource name, e.g. 'aws_instance'")]
    pub resource: String,
}

const PARAMS: ParamTable = ParamTable {
    rules: &[
        FieldRule::required("provider", &["provider"]),
        FieldRule::required("namespace", &["namespace"]),
        FieldRule::required("resource", &["resource"]),
    ],
    missing: "Provider, namespace, and resource are required",
};

/// One attribute of a resource schema.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResourceArgument {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub required: bool,
}

/// Structured output of the argument lookup.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResourceArguments {
    pub arguments: Vec<ResourceArgument>,
}

/// Schema attributes in source key order.
///
/// The attribute map sits under `block` or `schema.block`. Complex types
/// (lists, maps, objects) are JSON arrays in the schema and are rendered as
/// compact JSON text.
pub fn extract_arguments(body: &Value) -> ResourceArguments {
    let attributes = body
        .pointer("/block/attributes")
        .or_else(|| body.pointer("/schema/block/attributes"))
        .and_then(Value::as_object);

    let arguments = attributes
        .into_iter()
        .flatten()
        .map(|(name, attribute)| ResourceArgument {
            name: name.clone(),
            kind: match attribute.get("type") {
                Some(Value::String(kind)) => kind.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            },
            description: str_field(attribute, "description").to_string(),
            required: attribute
                .get("required")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        })
        .collect();

    ResourceArguments { arguments }
}

/// Resource Argument Details Tool implementation.
#[derive(Debug, Clone, Default)]
pub struct ResourceArgumentDetailsTool;

impl ResourceArgumentDetailsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "resourceArgumentDetails";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Fetches details about a specific resource type's arguments, including name, type, description, and requirements. Returned as JSON: {\"arguments\": [...]}. Requires 'namespace', 'provider' and 'resource'.";
}

#[async_trait::async_trait]
impl ToolHandler for ResourceArgumentDetailsTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn input_schema(&self) -> Arc<JsonObject> {
        schema_for_type::<ResourceArgumentDetailsParams>().into()
    }

    async fn execute(
        &self,
        arguments: &JsonObject,
        client: &RegistryClient,
    ) -> ToolResult<CallToolResult> {
        let params = PARAMS.resolve(arguments)?;
        let (namespace, provider, resource) = (
            params.value("namespace"),
            params.value("provider"),
            params.value("resource"),
        );
        info!("Fetching arguments of {} ({}/{})", resource, namespace, provider);

        let url = client
            .endpoints()
            .resource_schema(namespace, provider, resource);
        let body = client
            .fetch_json(&url)
            .await
            .map_err(|e| ToolError::from_registry(e, "Resource not found"))?
            .ok_or_else(|| ToolError::not_found("Resource not found"))?;

        json_result(&extract_arguments(&body))
    }
}
