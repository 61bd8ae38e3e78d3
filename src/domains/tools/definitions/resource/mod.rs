//! Resource tools: usage examples and schema arguments.

pub mod arguments;
pub mod usage;

pub use arguments::{ResourceArgumentDetailsParams, ResourceArgumentDetailsTool};
pub use usage::{ResourceUsageParams, ResourceUsageTool};
