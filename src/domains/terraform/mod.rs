//! Terraform registry domain.
//!
//! Everything the tools need to talk to the registry:
//! - `client` - transport seam and outcome classification
//! - `endpoints` - URL templates for provider, module and policy APIs
//! - `example` - "Example Usage" extraction from documentation pages
//! - `version` - semantic version ordering

pub mod client;
pub mod endpoints;
mod error;
pub mod example;
pub mod version;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{HttpRegistryTransport, RawResponse, RegistryClient, RegistryTransport};
pub use endpoints::RegistryEndpoints;
pub use error::{RegistryError, RegistryResult};
pub use example::{Example, ExampleExtraction, extract_example};
