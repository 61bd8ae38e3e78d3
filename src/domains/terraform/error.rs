//! Registry access error types.

use thiserror::Error;

/// Result type for registry calls.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Classified outcome of a failed registry call.
///
/// Produced once per call and never mutated. Each tool decides how a given
/// kind is worded for its callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry answered 404 for the requested entity.
    #[error("Not found: {url}")]
    NotFound { url: String },

    /// The registry answered with a non-success status other than 404.
    #[error("HTTP {status} {status_text}")]
    Http { status: u16, status_text: String },

    /// No response was received at all.
    #[error("Network error: {0}")]
    Network(String),
}

impl RegistryError {
    /// Create a network error.
    pub fn network(detail: impl Into<String>) -> Self {
        Self::Network(detail.into())
    }

    /// Tag naming the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not-found",
            Self::Http { .. } => "http-error",
            Self::Network(_) => "network-error",
        }
    }

    /// Human readable detail (status line or transport message).
    pub fn detail(&self) -> String {
        match self {
            Self::NotFound { url } => format!("404 Not Found ({url})"),
            Self::Http {
                status,
                status_text,
            } => format!("{status} {status_text}"),
            Self::Network(detail) => detail.clone(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        let not_found = RegistryError::NotFound {
            url: "https://registry.example/x".to_string(),
        };
        assert_eq!(not_found.kind(), "not-found");
        assert!(not_found.is_not_found());

        let http = RegistryError::Http {
            status: 503,
            status_text: "Service Unavailable".to_string(),
        };
        assert_eq!(http.kind(), "http-error");
        assert_eq!(http.detail(), "503 Service Unavailable");

        assert_eq!(RegistryError::network("refused").kind(), "network-error");
    }
}
