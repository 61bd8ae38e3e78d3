//! Module recommendations tool.
//!
//! Searches the registry for modules matching a free-text query.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::schema_for_type,
    model::{CallToolResult, JsonObject},
};
use schemars::JsonSchema;
use serde_json::Value;
use tracing::info;

use crate::domains::terraform::RegistryClient;
use crate::domains::tools::definitions::common::{array_at, str_field, success_result};
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::ToolHandler;
use crate::domains::tools::params::{FieldRule, ParamTable};

/// Parameters accepted by the module recommendations tool.
#[derive(Debug, Clone, JsonSchema)]
pub struct ModuleRecommendationsParams {
    #[schemars(description = "Search query, e.g. 'vpc'")]
    pub query: Option<String>,

    /// Fallback key for the query.
    #[schemars(description = "Alias of 'query'")]
    pub keyword: Option<String>,

    #[schemars(description = "Restrict results to one provider, e.g. 'aws'")]
    pub provider: Option<String>,
}

const PARAMS: ParamTable = ParamTable {
    rules: &[
        FieldRule::required("query", &["query", "keyword"]),
        FieldRule::optional("provider", &["provider"]),
    ],
    missing: "Search query is required for module recommendations",
};

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSummary {
    pub id: String,
    pub namespace: String,
    pub name: String,
    pub provider: String,
    pub description: String,
}

impl ModuleSummary {
    fn from_json(value: &Value) -> Self {
        Self {
            id: str_field(value, "id").to_string(),
            namespace: str_field(value, "namespace").to_string(),
            name: str_field(value, "name").to_string(),
            provider: str_field(value, "provider").to_string(),
            description: str_field(value, "description").trim().to_string(),
        }
    }
}

/// Search hits in registry order.
pub fn extract_modules(body: &Value) -> Vec<ModuleSummary> {
    array_at(body, "/modules")
        .iter()
        .map(ModuleSummary::from_json)
        .collect()
}

fn format_modules(query: &str, modules: &[ModuleSummary]) -> String {
    let mut text = format!("Recommended modules for \"{query}\":");
    for (i, module) in modules.iter().enumerate() {
        text.push_str(&format!(
            "\n{}. {}/{} ({})",
            i + 1,
            module.namespace,
            module.name,
            module.provider
        ));
        if !module.description.is_empty() {
            text.push_str(&format!(" - {}", module.description));
        }
    }
    text
}

/// Module Recommendations Tool implementation.
#[derive(Debug, Clone, Default)]
pub struct ModuleRecommendationsTool;

impl ModuleRecommendationsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "moduleRecommendations";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get recommended modules. Searches the Terraform registry for modules matching 'query' (or 'keyword'), optionally restricted to a 'provider', and returns the top matches.";
}

#[async_trait::async_trait]
impl ToolHandler for ModuleRecommendationsTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn input_schema(&self) -> Arc<JsonObject> {
        schema_for_type::<ModuleRecommendationsParams>().into()
    }

    async fn execute(
        &self,
        arguments: &JsonObject,
        client: &RegistryClient,
    ) -> ToolResult<CallToolResult> {
        let params = PARAMS.resolve(arguments)?;
        let query = params.value("query");
        info!("Searching modules for {:?}", query);

        let url = client
            .endpoints()
            .module_search(query, params.get("provider"));
        let body = client
            .fetch_json(&url)
            .await
            .map_err(|e| ToolError::from_registry(e, "Module search failed"))?
            .unwrap_or(Value::Null);

        let modules = extract_modules(&body);
        if modules.is_empty() {
            return Ok(success_result(format!("No modules found for \"{query}\"")));
        }
        Ok(success_result(format_modules(query, &modules)))
    }
}
