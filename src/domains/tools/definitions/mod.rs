//! Tool definitions module.
//!
//! Each tool is defined in its own file, grouped by registry area.

pub mod common;
pub mod module;
pub mod provider;
pub mod resource;

pub use module::{ModuleDetailsTool, ModuleRecommendationsTool};
pub use provider::{DataSourceLookupTool, ProviderLookupTool};
pub use resource::{ResourceArgumentDetailsTool, ResourceUsageTool};
