//! Tool-specific error types.
//!
//! Tool failures never reach the protocol layer as errors. The dispatcher
//! renders each one as a single `Error: ...` text block.

use rmcp::model::{CallToolResult, Content};
use thiserror::Error;
use tracing::warn;

use crate::domains::terraform::RegistryError;

/// Result type for tool execution.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors that can occur during tool operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// A required parameter was absent after alias resolution.
    #[error("{0}")]
    MissingParameter(String),

    /// The registry has no such entity.
    #[error("{0}")]
    NotFound(String),

    /// The provider exists but publishes no versions.
    #[error("No versions found for provider {0}")]
    NoVersionsFound(String),

    /// The registry answered with a failure status or could not be reached.
    #[error("{0}")]
    Upstream(String),

    /// An internal error occurred.
    #[error("{0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "missing parameter" error.
    pub fn missing_parameter(msg: impl Into<String>) -> Self {
        Self::MissingParameter(msg.into())
    }

    /// Create a new "not found" error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Map a registry failure, wording a 404 with the tool's own message.
    pub fn from_registry(err: RegistryError, not_found: impl Into<String>) -> Self {
        match err {
            RegistryError::NotFound { .. } => Self::NotFound(not_found.into()),
            RegistryError::Http {
                status,
                status_text,
            } => Self::Upstream(format!(
                "Registry request failed with HTTP {status} {status_text}"
            )),
            RegistryError::Network(detail) => {
                Self::Upstream(format!("Failed to reach the Terraform registry: {detail}"))
            }
        }
    }

    /// Text of the single content block carrying this error.
    pub fn to_text(&self) -> String {
        format!("Error: {self}")
    }

    /// Convert into the error tool result.
    pub fn into_call_result(self) -> CallToolResult {
        let text = self.to_text();
        warn!("{}", text);
        CallToolResult::error(vec![Content::text(text)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_text_is_prefixed() {
        assert_eq!(
            ToolError::missing_parameter("Provider name is required").to_text(),
            "Error: Provider name is required"
        );
        assert_eq!(
            ToolError::NoVersionsFound("noversions".to_string()).to_text(),
            "Error: No versions found for provider noversions"
        );
    }

    #[test]
    fn test_from_registry_wording() {
        let err = ToolError::from_registry(
            RegistryError::NotFound {
                url: "u".to_string(),
            },
            "Provider not found",
        );
        assert_eq!(err.to_text(), "Error: Provider not found");

        let err = ToolError::from_registry(
            RegistryError::Http {
                status: 502,
                status_text: "Bad Gateway".to_string(),
            },
            "Provider not found",
        );
        assert_eq!(
            err.to_text(),
            "Error: Registry request failed with HTTP 502 Bad Gateway"
        );

        let err = ToolError::from_registry(RegistryError::network("timed out"), "x");
        assert!(matches!(err, ToolError::Upstream(_)));
    }
}
