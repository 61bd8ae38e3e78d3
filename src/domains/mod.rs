//! Domains module containing business logic organized by bounded contexts.
//!
//! - `terraform`: everything that talks to or interprets the registry
//! - `tools`: the MCP tools built on top of it

pub mod terraform;
pub mod tools;
