use crate::agent::OutputType;
use crate::search::{SearchError, SearchResult, SerpApiClient};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("Failed to encode tool output: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A capability the runner can hand to the model.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn input_schema(&self) -> Value;
    fn output_schema(&self) -> Value;
    async fn call(&self, arguments: Value) -> Result<Value, ToolError>;
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool, replacing any earlier tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.retain(|existing| existing.name() != tool.name());
        self.tools.push(tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.iter().find(|tool| tool.name() == name).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: format!(
                    "{}\nReturns JSON matching this schema: {}",
                    tool.description(),
                    tool.output_schema()
                ),
                parameters: tool.input_schema(),
            })
            .collect()
    }

    /// Renders the `tools` array of a chat completions request.
    pub fn to_openai_format(&self) -> Vec<Value> {
        self.definitions()
            .into_iter()
            .map(|definition| {
                json!({
                    "type": "function",
                    "function": {
                        "name": definition.name,
                        "description": definition.description,
                        "parameters": definition.parameters
                    }
                })
            })
            .collect()
    }
}

pub struct SearchWebTool {
    client: SerpApiClient,
}

impl SearchWebTool {
    pub const NAME: &'static str = "search_web";

    pub fn new(client: SerpApiClient) -> Self {
        Self { client }
    }

    pub async fn search_web(&self, query: &str) -> Result<Vec<SearchResult>, ToolError> {
        if query.trim().is_empty() {
            return Err(ToolError::InvalidArguments(
                "`query` must be a non-empty string".to_string(),
            ));
        }
        Ok(self.client.search(query).await?)
    }
}

#[async_trait]
impl Tool for SearchWebTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Search the web and return the top results as title, url and snippet."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Free-text search query"
                }
            },
            "required": ["query"]
        })
    }

    fn output_schema(&self) -> Value {
        json!({
            "type": "array",
            "items": SearchResult::schema()
        })
    }

    async fn call(&self, arguments: Value) -> Result<Value, ToolError> {
        let query = arguments
            .get("query")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidArguments("missing string field `query`".to_string()))?;
        let results = self.search_web(query).await?;
        Ok(serde_json::to_value(results)?)
    }
}
