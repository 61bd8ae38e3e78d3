//! Tool handler seam.
//!
//! Every tool is a fixed pipeline: resolve parameters, call the registry,
//! extract, format. Handlers report expected domain failures through
//! [`ToolError`]; the dispatcher turns those into content.

use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, Tool};

use super::error::ToolResult;
use crate::domains::terraform::RegistryClient;

/// Trait implemented by every tool.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Name of this tool as registered in MCP.
    fn name(&self) -> &'static str;

    /// Description shown to clients.
    fn description(&self) -> &'static str;

    /// JSON schema of the accepted arguments, aliases included.
    fn input_schema(&self) -> Arc<JsonObject>;

    /// Execute the tool with the given arguments.
    async fn execute(
        &self,
        arguments: &JsonObject,
        client: &RegistryClient,
    ) -> ToolResult<CallToolResult>;

    /// Tool model (metadata) for listings.
    fn to_tool(&self) -> Tool {
        Tool {
            name: self.name().into(),
            description: Some(self.description().into()),
            input_schema: self.input_schema(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
