//! Module tools module.
//!
//! - `recommendations`: free-text module search
//! - `details`: versions and root interface of one module

pub mod details;
pub mod recommendations;

pub use details::{ModuleDetailsParams, ModuleDetailsTool};
pub use recommendations::{ModuleRecommendationsParams, ModuleRecommendationsTool};
