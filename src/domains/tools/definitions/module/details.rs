//! Module details tool.
//!
//! Returns a module's versions and root module interface as JSON text.

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
use crate::domains::tools::definitions::common::{array_at, json_result};
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::ToolHandler;
use crate::domains::tools::params::{FieldRule, ParamTable};

/// Parameters accepted by the module details tool.
#[derive(Debug, Clone, JsonSchema)]
pub struct ModuleDetailsParams {
    #[schemars(description = "Module namespace, e.g. 'terraform-aws-modules'")]
    pub namespace: String,

    #[schemars(description = "Module name, e.g. 'vpc'")]
    pub module: String,

    #[schemars(description = "Module provider, e.g. 'aws'")]
    pub provider: String,

    #[schemars(description = "Module release (default: latest)")]
    pub version: Option<String>,
}

const PARAMS: ParamTable = ParamTable {
    rules: &[
        FieldRule::required("namespace", &["namespace"]),
        FieldRule::required("module", &["module"]),
        FieldRule::required("provider", &["provider"]),
        FieldRule::optional("version", &["version"]),
    ],
    missing: "Namespace, module, and provider are required",
};

/// Structured output of the module lookup. Entries are passed through as
/// the registry returns them.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModuleDetails {
    pub versions: Vec<Value>,
    pub inputs: Vec<Value>,
    pub outputs: Vec<Value>,
    pub dependencies: Vec<Value>,
}

/// Root module interface; fields under `root` win over top-level ones.
pub fn extract_module_details(body: &Value) -> ModuleDetails {
    let root_or_top = |field: &str| -> Vec<Value> {
        let nested = array_at(body, &format!("/root/{field}"));
        if nested.is_empty() {
            array_at(body, &format!("/{field}")).to_vec()
        } else {
            nested.to_vec()
        }
    };

    ModuleDetails {
        versions: array_at(body, "/versions").to_vec(),
        inputs: root_or_top("inputs"),
        outputs: root_or_top("outputs"),
        dependencies: root_or_top("dependencies"),
    }
}

/// Module Details Tool implementation.
#[derive(Debug, Clone, Default)]
pub struct ModuleDetailsTool;

impl ModuleDetailsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "moduleDetails";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Retrieves detailed metadata for a Terraform module including versions, inputs, outputs, and dependencies. Returned as JSON. Requires 'namespace', 'module' and 'provider'; 'version' is optional.";
}

#[async_trait::async_trait]
impl ToolHandler for ModuleDetailsTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn input_schema(&self) -> Arc<JsonObject> {
        schema_for_type::<ModuleDetailsParams>().into()
    }

    async fn execute(
        &self,
        arguments: &JsonObject,
        client: &RegistryClient,
    ) -> ToolResult<CallToolResult> {
        let params = PARAMS.resolve(arguments)?;
        let (namespace, module, provider) = (
            params.value("namespace"),
            params.value("module"),
            params.value("provider"),
        );
        info!("Fetching module {}/{}/{}", namespace, module, provider);

        let url = client
            .endpoints()
            .module_details(namespace, module, provider, params.get("version"));
        let body = client
            .fetch_json(&url)
            .await
            .map_err(|e| ToolError::from_registry(e, "Module not found"))?
            .ok_or_else(|| ToolError::not_found("Module not found"))?;

        json_result(&extract_module_details(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::terraform::testing::StubTransport;
    use crate::domains::tools::definitions::common::result_text;
    use serde_json::json;

    const VPC: &str = "http://registry.test/v1/modules/terraform-aws-modules/vpc/aws";

    fn args(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    fn vpc_body() -> Value {
        json!({
            "id": "terraform-aws-modules/vpc/aws",
            "versions": ["3.0.0", "3.1.0", "3.2.0"],
            "root": {
                "inputs": [
                    {"name": "name", "type": "string", "required": true},
                    {"name": "cidr", "type": "string", "required": true}
                ],
                "outputs": [{"name": "vpc_id", "description": "The ID of the VPC"}],
                "dependencies": ["aws"]
            }
        })
    }

    #[tokio::test]
    async fn test_returns_exactly_four_keys() {
        let client = StubTransport::new().with_json(VPC, vpc_body()).into_client();
        let result = ModuleDetailsTool
            .execute(
                &args(json!({"namespace": "terraform-aws-modules", "module": "vpc", "provider": "aws"})),
                &client,
            )
            .await
            .unwrap();

        let parsed: Value = serde_json::from_str(&result_text(&result)).unwrap();
        let keys: Vec<_> = parsed.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["versions", "inputs", "outputs", "dependencies"]);
        assert_eq!(parsed["inputs"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["dependencies"], json!(["aws"]));
    }

    #[test]
    fn test_absent_fields_default_to_empty() {
        let details = extract_module_details(&json!({"id": "x"}));
        assert!(details.versions.is_empty());
        assert!(details.inputs.is_empty());
        assert!(details.outputs.is_empty());
        assert!(details.dependencies.is_empty());

        let top_level = extract_module_details(&json!({"inputs": [{"name": "a"}]}));
        assert_eq!(top_level.inputs.len(), 1);
    }

    #[tokio::test]
    async fn test_version_selects_release() {
        let stub = StubTransport::new().with_json(format!("{VPC}/3.1.0"), vpc_body());
        let result = ModuleDetailsTool
            .execute(
                &args(json!({
                    "namespace": "terraform-aws-modules",
                    "module": "vpc",
                    "provider": "aws",
                    "version": "3.1.0"
                })),
                &stub.into_client(),
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_failures() {
        let client = StubTransport::new().into_client();

        let err = ModuleDetailsTool
            .execute(&args(json!({"namespace": "terraform-aws-modules", "module": "vpc"})), &client)
            .await
            .unwrap_err();
        assert_eq!(err.to_text(), "Error: Namespace, module, and provider are required");

        let err = ModuleDetailsTool
            .execute(
                &args(json!({"namespace": "nobody", "module": "vpc", "provider": "aws"})),
                &client,
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_text(), "Error: Module not found");
    }
}
