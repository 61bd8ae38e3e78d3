//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tool registry.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool
//! and registered in `domains/tools/registry.rs`. Every transport lists and
//! calls tools through the same [`ToolRegistry`], so an unknown tool name
//! gets the same placeholder answer over STDIO, TCP and HTTP.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::{Error, Result};
use crate::domains::terraform::{HttpRegistryTransport, RegistryClient, RegistryTransport};
use crate::domains::tools::ToolRegistry;

/// Instructions advertised to clients on initialize.
pub const INSTRUCTIONS: &str = "Terraform registry MCP server. Look up providers and their \
     versions, resource usage examples and arguments, data sources, and modules published on \
     the Terraform registry.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp. It is cheap
/// to clone; clones share the tool registry.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool catalog and dispatcher.
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a new MCP server talking to the configured registry over HTTPS.
    pub fn new(config: Config) -> Result<Self> {
        let transport = HttpRegistryTransport::new(&config.registry)
            .map_err(|e| Error::config(format!("Failed to build registry HTTP client: {e}")))?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a server over an explicit registry transport.
    pub fn with_transport(config: Config, transport: Arc<dyn RegistryTransport>) -> Self {
        let client = RegistryClient::from_config(&config.registry, transport);
        Self {
            config: Arc::new(config),
            registry: Arc::new(ToolRegistry::new(client)),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the tool registry.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.registry
            .get_all_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Only malformed arguments are reported as `Err`; tool failures and
    /// unknown tools come back inside the result content.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value> {
        let arguments = match arguments {
            serde_json::Value::Object(map) => Some(map),
            serde_json::Value::Null => None,
            other => {
                return Err(Error::invalid_arguments(format!(
                    "expected an object, got {other}"
                )));
            }
        };

        let result = self.registry.call_tool(name, arguments).await;
        Ok(serde_json::to_value(result)?)
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.registry.get_all_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        info!("Calling tool: {}", request.name);
        Ok(self
            .registry
            .call_tool(&request.name, request.arguments)
            .await)
    }
}
