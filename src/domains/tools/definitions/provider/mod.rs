//! Provider tools module.
//!
//! - `lookup`: provider versions, newest first
//! - `data_sources`: data sources published by a provider

pub mod data_sources;
pub mod lookup;

pub use data_sources::{DataSourceLookupParams, DataSourceLookupTool};
pub use lookup::{ProviderLookupParams, ProviderLookupTool};
