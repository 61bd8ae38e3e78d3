//! Tools domain module.
//!
//! Tools are the functions MCP clients call to query the Terraform registry.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `params.rs` - Alias resolution of raw tool arguments
//! - `handlers.rs` - The `ToolHandler` trait every tool implements
//! - `registry.rs` - Tool catalog and dispatch, shared by every transport
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` implementing `ToolHandler`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in `ToolRegistry::new`

pub mod definitions;
mod error;
mod handlers;
mod params;
mod registry;

pub use error::{ToolError, ToolResult};
pub use handlers::ToolHandler;
pub use params::{CanonicalParams, FieldRule, ParamTable};
pub use registry::ToolRegistry;
