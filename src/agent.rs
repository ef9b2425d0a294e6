use crate::config::Config;
use crate::model::{ChatMessage, ChatModel, ModelError, OpenAiChatModel};
use crate::output;
use crate::prompts;
use crate::search::{SearchResult, SerpApiClient};
use crate::tool::{SearchWebTool, Tool, ToolError, ToolRegistry};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Model call failed: {0}")]
    Model(#[from] ModelError),
    #[error("Model requested unknown tool `{0}`")]
    UnknownTool(String),
    #[error("Tool `{name}` failed: {source}")]
    Tool {
        name: String,
        #[source]
        source: ToolError,
    },
    #[error("Model returned an empty final answer")]
    EmptyResponse,
    #[error("Final answer does not match the expected output shape: {source}")]
    Output {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("No final answer after {0} turns")]
    MaxTurns(usize),
}

/// A structured final answer an agent can be asked to produce.
pub trait OutputType: DeserializeOwned + Send {
    const NAME: &'static str;
    fn schema() -> Value;
}

/// Static description of an agent. Built once, shared across runs.
pub struct Agent<O: OutputType> {
    name: String,
    instructions: String,
    model: Arc<dyn ChatModel>,
    tools: ToolRegistry,
    output: PhantomData<fn() -> O>,
}

impl<O: OutputType> Agent<O> {
    pub fn new(name: impl Into<String>, instructions: impl Into<String>, model: Arc<dyn ChatModel>) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            model,
            tools: ToolRegistry::new(),
            output: PhantomData,
        }
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.register(tool);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn system_prompt(&self) -> String {
        prompts::system_prompt(&self.instructions, O::NAME, &O::schema().to_string())
    }
}

/// The search agent: OpenAI-compatible model plus the `search_web` tool.
pub fn web_search_agent(config: &Config) -> Agent<SearchResult> {
    let model = OpenAiChatModel::new(
        config.base_url.clone(),
        config.api_key.clone(),
        config.model_name.clone(),
    );
    let search = SerpApiClient::new(config.serpapi_endpoint.clone(), config.serpapi_key.clone());

    Agent::new(
        prompts::WEB_SEARCH_AGENT_NAME,
        prompts::WEB_SEARCH_INSTRUCTIONS,
        Arc::new(model),
    )
    .with_tool(Arc::new(SearchWebTool::new(search)))
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunResult<O> {
    pub final_output: O,
    pub turns: usize,
    pub tool_calls: usize,
}

#[derive(Debug, Clone)]
pub struct Runner {
    max_turns: usize,
    trace: bool,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MAX_TURNS)
    }
}

impl Runner {
    pub fn new(max_turns: usize) -> Self {
        Self {
            max_turns,
            trace: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_turns).with_trace(config.trace)
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Drives the model until it stops asking for tools, then validates
    /// its reply against `O`.
    pub async fn run<O: OutputType>(&self, agent: &Agent<O>, input: &str) -> Result<RunResult<O>, AgentError> {
        let tools = agent.tools.to_openai_format();
        let mut messages = vec![
            ChatMessage::system(agent.system_prompt()),
            ChatMessage::user(input),
        ];
        let mut tool_calls = 0;

        for turn in 1..=self.max_turns {
            let reply = agent.model.complete(&messages, &tools).await?;
            let requested = reply.requested_tools().to_vec();

            if requested.is_empty() {
                let content = reply.content.unwrap_or_default();
                let final_output = parse_output::<O>(&content)?;
                return Ok(RunResult {
                    final_output,
                    turns: turn,
                    tool_calls,
                });
            }

            messages.push(reply);

            for call in requested {
                let name = call.function.name.as_str();
                let tool = agent
                    .tools
                    .get(name)
                    .ok_or_else(|| AgentError::UnknownTool(name.to_string()))?;

                if self.trace {
                    output::tool_call(name, &call.function.arguments);
                }

                let result = invoke(tool.as_ref(), &call.function.arguments)
                    .await
                    .map_err(|source| AgentError::Tool {
                        name: name.to_string(),
                        source,
                    })?;
                tool_calls += 1;

                if self.trace {
                    output::tool_result(name, &summarize(&result));
                }

                messages.push(ChatMessage::tool(call.id, result.to_string()));
            }
        }

        Err(AgentError::MaxTurns(self.max_turns))
    }
}

async fn invoke(tool: &dyn Tool, arguments: &str) -> Result<Value, ToolError> {
    let arguments = if arguments.trim().is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_str(arguments)
            .map_err(|e| ToolError::InvalidArguments(format!("arguments are not valid JSON: {}", e)))?
    };
    tool.call(arguments).await
}

fn summarize(result: &Value) -> String {
    match result {
        Value::Array(items) => format!("{} result(s)", items.len()),
        other => other.to_string(),
    }
}

/// Parses a final reply into `O`, tolerating a surrounding Markdown fence.
pub fn parse_output<O: OutputType>(content: &str) -> Result<O, AgentError> {
    let body = strip_code_fence(content);
    if body.is_empty() {
        return Err(AgentError::EmptyResponse);
    }
    serde_json::from_str(body).map_err(|source| AgentError::Output {
        raw: content.to_string(),
        source,
    })
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    // drop the language tag, if any
    match rest.split_once('\n') {
        Some((tag, body)) if !tag.trim().contains('{') => body.trim(),
        _ => rest.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fences_with_and_without_language_tag() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn parse_output_rejects_missing_snippet() {
        let err = parse_output::<SearchResult>(r#"{"title":"t","url":"u"}"#).unwrap_err();
        assert!(matches!(err, AgentError::Output { .. }));
    }

    #[test]
    fn parse_output_rejects_null_field() {
        let err =
            parse_output::<SearchResult>(r#"{"title":"t","url":"u","snippet":null}"#).unwrap_err();
        assert!(matches!(err, AgentError::Output { .. }));
    }

    #[test]
    fn parse_output_treats_blank_reply_as_empty() {
        assert!(matches!(
            parse_output::<SearchResult>("   "),
            Err(AgentError::EmptyResponse)
        ));
    }
}
