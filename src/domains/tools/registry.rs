//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The static catalog of available tools
//! - Dispatch of tool calls by exact name, shared by every transport
//! - Conversion of every failure into content, never a protocol error

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use tracing::{debug, error, instrument, warn};

use super::definitions::common::success_result;
use super::definitions::{
    DataSourceLookupTool, ModuleDetailsTool, ModuleRecommendationsTool, ProviderLookupTool,
    ResourceArgumentDetailsTool, ResourceUsageTool,
};
use super::error::ToolError;
use super::handlers::ToolHandler;
use crate::domains::terraform::RegistryClient;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    client: RegistryClient,
    tools: Vec<Box<dyn ToolHandler>>,
}

impl ToolRegistry {
    /// Create a registry holding the full tool catalog.
    pub fn new(client: RegistryClient) -> Self {
        let mut registry = Self {
            client,
            tools: Vec::new(),
        };
        registry.register(Box::new(ProviderLookupTool));
        registry.register(Box::new(ResourceUsageTool));
        registry.register(Box::new(ModuleRecommendationsTool));
        registry.register(Box::new(DataSourceLookupTool));
        registry.register(Box::new(ResourceArgumentDetailsTool));
        registry.register(Box::new(ModuleDetailsTool));
        registry
    }

    /// Add a tool to the catalog. A tool with the same name is replaced.
    pub fn register(&mut self, handler: Box<dyn ToolHandler>) {
        match self.tools.iter().position(|t| t.name() == handler.name()) {
            Some(index) => self.tools[index] = handler,
            None => self.tools.push(handler),
        }
    }

    /// Get all tool names, in catalog order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    pub fn get_all_tools(&self) -> Vec<Tool> {
        self.tools.iter().map(|t| t.to_tool()).collect()
    }

    /// Dispatch a tool call to the handler registered under `name`.
    ///
    /// Unknown names answer with a placeholder success. Handler failures,
    /// panics included, become a single `Error: ...` text block.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let Some(handler) = self.tools.iter().find(|t| t.name() == name) else {
            warn!("Unknown tool requested: {}", name);
            return success_result(format!("Mock response for {name}"));
        };

        let arguments = arguments.unwrap_or_default();
        debug!("Calling tool {} with {} argument(s)", name, arguments.len());

        let outcome = AssertUnwindSafe(handler.execute(&arguments, &self.client))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => err.into_call_result(),
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| format!("Tool {name} failed unexpectedly"));
                error!("Tool {} panicked: {}", name, message);
                ToolError::internal(message).into_call_result()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domains::terraform::{RawResponse, testing::StubTransport};
    use crate::domains::tools::definitions::common::result_text;
    use crate::domains::tools::error::ToolResult;
    use rmcp::handler::server::tool::schema_for_type;
    use serde_json::json;

    fn test_registry() -> ToolRegistry {
        ToolRegistry::new(StubTransport::new().into_client())
    }

    #[derive(schemars::JsonSchema)]
    struct NoParams {}

    struct PanickingTool;

    #[async_trait::async_trait]
    impl ToolHandler for PanickingTool {
        fn name(&self) -> &'static str {
            "panicky"
        }

        fn description(&self) -> &'static str {
            "Always panics"
        }

        fn input_schema(&self) -> Arc<JsonObject> {
            schema_for_type::<NoParams>().into()
        }

        async fn execute(
            &self,
            _arguments: &JsonObject,
            _client: &RegistryClient,
        ) -> ToolResult<CallToolResult> {
            panic!("schema decoder exploded");
        }
    }

    #[test]
    fn test_registry_catalog() {
        let registry = test_registry();
        assert_eq!(
            registry.tool_names(),
            vec![
                "providerLookup",
                "resourceUsage",
                "moduleRecommendations",
                "dataSourceLookup",
                "resourceArgumentDetails",
                "moduleDetails",
            ]
        );

        for tool in registry.get_all_tools() {
            assert!(!tool.description.unwrap_or_default().is_empty());
            assert_eq!(tool.input_schema.get("type"), Some(&json!("object")));
        }
    }

    #[test]
    fn test_unknown_tool_is_placeholder_success() {
        let result = tokio_test::block_on(test_registry().call_tool("unknownTool", None));
        assert_ne!(result.is_error, Some(true));
        assert!(result_text(&result).contains("unknownTool"));
    }

    #[tokio::test]
    async fn test_tool_error_becomes_content() {
        let result = test_registry().call_tool("providerLookup", None).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(result_text(&result), "Error: Provider name is required");
    }

    #[tokio::test]
    async fn test_upstream_failure_becomes_content() {
        let stub = StubTransport::new().with_response(
            "http://registry.test/v1/providers/hashicorp/aws/resources/aws_instance",
            RawResponse::status(500, "Internal Server Error"),
        );
        let registry = ToolRegistry::new(stub.into_client());
        let arguments = json!({"namespace": "hashicorp", "provider": "aws", "resource": "aws_instance"});

        let result = registry
            .call_tool("resourceArgumentDetails", arguments.as_object().cloned())
            .await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            result_text(&result),
            "Error: Registry request failed with HTTP 500 Internal Server Error"
        );
    }

    #[tokio::test]
    async fn test_panic_becomes_content() {
        let mut registry = test_registry();
        registry.register(Box::new(PanickingTool));
        assert_eq!(registry.tool_names().len(), 7);

        let result = registry.call_tool("panicky", None).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(result_text(&result), "Error: schema decoder exploded");
    }
}
