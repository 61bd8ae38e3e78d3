//! Data source lookup tool.
//!
//! Returns the data sources a provider publishes as JSON text.

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
use crate::domains::tools::definitions::common::{array_at, json_result, str_field};
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::ToolHandler;
use crate::domains::tools::params::{FieldRule, ParamTable};

/// Parameters accepted by the data source lookup tool.
#[derive(Debug, Clone, JsonSchema)]
pub struct DataSourceLookupParams {
    #[schemars(description = "Provider name, e.g. 'aws'")]
    pub provider: String,

    #[schemars(description = "Provider namespace, e.g. 'hashicorp'")]
    pub namespace: String,
}

const PARAMS: ParamTable = ParamTable {
    rules: &[
        FieldRule::required("provider", &["provider"]),
        FieldRule::required("namespace", &["namespace"]),
    ],
    missing: "Both provider and namespace are required",
};

/// Structured output of the data source lookup.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DataSourceList {
    pub data_sources: Vec<String>,
}

/// Data source names, in registry order; entries are either plain strings or
/// objects carrying `name`.
pub fn extract_data_sources(body: &Value) -> DataSourceList {
    let data_sources = array_at(body, "/data_sources")
        .iter()
        .map(|entry| match entry {
            Value::String(name) => name.as_str(),
            other => str_field(other, "name"),
        })
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    DataSourceList { data_sources }
}

/// Data Source Lookup Tool implementation.
#[derive(Debug, Clone, Default)]
pub struct DataSourceLookupTool;

impl DataSourceLookupTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "dataSourceLookup";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Lookup data sources. Lists the data sources published by a Terraform provider, returned as JSON: {\"data_sources\": [...]}. Requires 'provider' and 'namespace'.";
}

#[async_trait::async_trait]
impl ToolHandler for DataSourceLookupTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn input_schema(&self) -> Arc<JsonObject> {
        schema_for_type::<DataSourceLookupParams>().into()
    }

    async fn execute(
        &self,
        arguments: &JsonObject,
        client: &RegistryClient,
    ) -> ToolResult<CallToolResult> {
        let params = PARAMS.resolve(arguments)?;
        let (namespace, provider) = (params.value("namespace"), params.value("provider"));
        info!("Listing data sources of {}/{}", namespace, provider);

        let url = client.endpoints().provider_data_sources(namespace, provider);
        let body = client
            .fetch_json(&url)
            .await
            .map_err(|e| ToolError::from_registry(e, "Provider not found"))?
            .ok_or_else(|| {
                ToolError::not_found(format!(
                    "No data sources found for provider {namespace}/{provider}"
                ))
            })?;

        json_result(&extract_data_sources(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::terraform::{RawResponse, testing::StubTransport};
    use crate::domains::tools::definitions::common::result_text;
    use serde_json::json;

    const URL: &str = "http://registry.test/v1/providers/hashicorp/aws/data-sources";

    fn args(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_extract_mixed_entries() {
        let list = extract_data_sources(&json!({
            "data_sources": [{"name": "aws_ami"}, "aws_vpc", {"id": 3}]
        }));
        assert_eq!(list.data_sources, vec!["aws_ami", "aws_vpc"]);
        assert!(extract_data_sources(&json!({})).data_sources.is_empty());
    }

    #[tokio::test]
    async fn test_returns_json_block() {
        let client = StubTransport::new()
            .with_json(
                URL,
                json!({"data_sources": [{"name": "aws_ami"}, {"name": "aws_availability_zones"}]}),
            )
            .into_client();
        let result = DataSourceLookupTool
            .execute(&args(json!({"provider": "aws", "namespace": "hashicorp"})), &client)
            .await
            .unwrap();

        let parsed: Value = serde_json::from_str(&result_text(&result)).unwrap();
        let keys: Vec<_> = parsed.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["data_sources"]);
        assert_eq!(parsed["data_sources"], json!(["aws_ami", "aws_availability_zones"]));
    }

    #[tokio::test]
    async fn test_empty_list_is_valid() {
        let client = StubTransport::new()
            .with_json(URL, json!({"data_sources": []}))
            .into_client();
        let result = DataSourceLookupTool
            .execute(&args(json!({"provider": "aws", "namespace": "hashicorp"})), &client)
            .await
            .unwrap();
        assert_eq!(result_text(&result), r#"{"data_sources":[]}"#);
    }

    #[tokio::test]
    async fn test_failures() {
        let client = StubTransport::new()
            .with_response(URL, RawResponse::ok("not json"))
            .into_client();

        let err = DataSourceLookupTool
            .execute(&args(json!({"provider": "aws"})), &client)
            .await
            .unwrap_err();
        assert_eq!(err.to_text(), "Error: Both provider and namespace are required");

        let err = DataSourceLookupTool
            .execute(&args(json!({"provider": "aws", "namespace": "hashicorp"})), &client)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_text(),
            "Error: No data sources found for provider hashicorp/aws"
        );

        let err = DataSourceLookupTool
            .execute(&args(json!({"provider": "nope", "namespace": "hashicorp"})), &client)
            .await
            .unwrap_err();
        assert_eq!(err.to_text(), "Error: Provider not found");
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let client = StubTransport::new()
            .with_response(URL, RawResponse::status(500, "Internal Server Error"))
            .into_client();

        let err = DataSourceLookupTool
            .execute(&args(json!({"provider": "aws", "namespace": "hashicorp"})), &client)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_text(),
            "Error: Registry request failed with HTTP 500 Internal Server Error"
        );
        assert_eq!(err.into_call_result().is_error, Some(true));
    }
}
