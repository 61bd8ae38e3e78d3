//! Alias-tolerant parameter resolution.
//!
//! Clients name the same argument in different ways (`provider` or `name`,
//! `query` or `keyword`). Each tool declares a [`ParamTable`] listing, per
//! canonical field, the keys to try in priority order. Resolution is pure.

use rmcp::model::JsonObject;
use serde_json::Value;

use super::error::ToolError;

/// One canonical field and the argument keys that may carry it.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub keys: &'static [&'static str],
    pub required: bool,
}

impl FieldRule {
    pub const fn required(field: &'static str, keys: &'static [&'static str]) -> Self {
        Self {
            field,
            keys,
            required: true,
        }
    }

    pub const fn optional(field: &'static str, keys: &'static [&'static str]) -> Self {
        Self {
            field,
            keys,
            required: false,
        }
    }
}

/// Resolution table of a tool.
///
/// `missing` is reported whenever any required field is absent, so jointly
/// required fields share one message.
#[derive(Debug, Clone, Copy)]
pub struct ParamTable {
    pub rules: &'static [FieldRule],
    pub missing: &'static str,
}

/// Canonical parameters after resolution: trimmed and non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalParams {
    values: Vec<(&'static str, String)>,
}

impl CanonicalParams {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Value of a field declared required; empty if the table did not
    /// declare it.
    pub fn value(&self, field: &str) -> &str {
        self.get(field).unwrap_or_default()
    }
}

impl ParamTable {
    /// Resolve raw arguments into canonical parameters.
    pub fn resolve(&self, arguments: &JsonObject) -> Result<CanonicalParams, ToolError> {
        let mut params = CanonicalParams::default();
        for rule in self.rules {
            match rule.keys.iter().find_map(|key| scalar(arguments.get(*key))) {
                Some(value) => params.values.push((rule.field, value)),
                None if rule.required => return Err(ToolError::missing_parameter(self.missing)),
                None => {}
            }
        }
        Ok(params)
    }
}

/// Trimmed text of a string, number or boolean argument; `None` when absent,
/// blank, or structured.
fn scalar(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
