//! Common utilities shared across registry tools.
//!
//! Provider name splitting, JSON field access tolerant of absent fields,
//! and result construction helpers.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::Value;

use crate::domains::tools::error::{ToolError, ToolResult};

/// A provider address after namespace resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderAddress {
    pub namespace: String,
    pub name: String,
}

impl ProviderAddress {
    /// Resolve `provider` (either `name` or `namespace/name`) against an
    /// explicit namespace and the configured default.
    ///
    /// A namespace embedded in `provider` wins over `namespace`.
    pub fn resolve(provider: &str, namespace: Option<&str>, default_namespace: &str) -> Self {
        match provider.split_once('/') {
            Some((ns, name)) if !ns.trim().is_empty() && !name.trim().is_empty() => Self {
                namespace: ns.trim().to_string(),
                name: name.trim().to_string(),
            },
            _ => Self {
                namespace: namespace.unwrap_or(default_namespace).to_string(),
                name: provider.trim_matches('/').to_string(),
            },
        }
    }
}

impl std::fmt::Display for ProviderAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// String field of a JSON object, empty when absent or not a string.
pub fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or_default()
}

/// Array at a JSON pointer, empty when absent or not an array.
pub fn array_at<'a>(value: &'a Value, pointer: &str) -> &'a [Value] {
    value
        .pointer(pointer)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Create a success result whose single text block is `value` as JSON.
pub fn json_result<T: Serialize>(value: &T) -> ToolResult<CallToolResult> {
    let text = serde_json::to_string(value)
        .map_err(|e| ToolError::internal(format!("Failed to encode response: {e}")))?;
    Ok(success_result(text))
}

/// Text of the first content block of a result.
#[cfg(test)]
pub fn result_text(result: &CallToolResult) -> String {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(text) => text.text.clone(),
        other => panic!("expected text content, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_provider_address_forms() {
        assert_eq!(
            ProviderAddress::resolve("aws", None, "hashicorp").to_string(),
            "hashicorp/aws"
        );
        assert_eq!(
            ProviderAddress::resolve("aws", Some("myorg"), "hashicorp").to_string(),
            "myorg/aws"
        );
        assert_eq!(
            ProviderAddress::resolve("integrations/github", Some("ignored"), "hashicorp")
                .to_string(),
            "integrations/github"
        );
        assert_eq!(
            ProviderAddress::resolve("/aws", None, "hashicorp").to_string(),
            "hashicorp/aws"
        );
    }

    #[test]
    fn test_json_field_helpers() {
        let value = json!({"a": "x", "n": 1, "root": {"list": [1, 2]}});
        assert_eq!(str_field(&value, "a"), "x");
        assert_eq!(str_field(&value, "n"), "");
        assert_eq!(str_field(&value, "missing"), "");
        assert_eq!(array_at(&value, "/root/list").len(), 2);
        assert!(array_at(&value, "/root/none").is_empty());
        assert!(array_at(&Value::Null, "/versions").is_empty());
    }
}
