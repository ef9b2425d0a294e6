use crate::agent::OutputType;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("SERPAPI_KEY is not set; web search is unavailable")]
    MissingApiKey,
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Search provider returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Search provider error: {0}")]
    Provider(String),
    #[error("Search result {index} is missing field `{field}`")]
    Shape { index: usize, field: &'static str },
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One normalized search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

impl SearchResult {
    /// Reads `title`, `link` and `snippet` off a raw provider item.
    pub fn from_provider_item(index: usize, item: &Value) -> Result<Self, SearchError> {
        let field = |name: &'static str| {
            item.get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or(SearchError::Shape { index, field: name })
        };

        Ok(Self {
            title: field("title")?,
            url: field("link")?,
            snippet: field("snippet")?,
        })
    }
}

impl OutputType for SearchResult {
    const NAME: &'static str = "SearchResult";

    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "title": { "type": "string" },
                "url": { "type": "string" },
                "snippet": { "type": "string" }
            },
            "required": ["title", "url", "snippet"]
        })
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<Value>,
    error: Option<String>,
}

#[derive(Clone)]
pub struct SerpApiClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl SerpApiClient {
    pub fn new(endpoint: String, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
        }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let api_key = self.api_key.as_deref().ok_or(SearchError::MissingApiKey)?;

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("api_key", api_key),
                ("google_domain", "google.com"),
                ("gl", "us"),
                ("hl", "en"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<SearchResponse>(&body)
                .ok()
                .and_then(|parsed| parsed.error)
                .unwrap_or(body);
            return Err(SearchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SearchResponse = serde_json::from_str(&body)?;
        if let Some(error) = parsed.error {
            return Err(SearchError::Provider(error));
        }

        parsed
            .organic_results
            .iter()
            .enumerate()
            .map(|(index, item)| SearchResult::from_provider_item(index, item))
            .collect()
    }
}
