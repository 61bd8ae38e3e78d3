//! Terraform Registry MCP Server Library
//!
//! This crate exposes the public Terraform registry to Model Context
//! Protocol (MCP) clients as six tools: provider lookup, resource usage
//! examples, module recommendations, data source listing, resource argument
//! details and module details.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server handler and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **terraform**: Registry client, URL templates, example extraction, version ordering
//!   - **tools**: Parameter resolution, tool handlers and the dispatcher
//!
//! # Example
//!
//! ```rust,no_run
//! use terraform_registry_mcp::{core::Config, core::McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
