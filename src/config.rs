use std::env;
use thiserror::Error;

pub const DEFAULT_SERPAPI_ENDPOINT: &str = "https://serpapi.com/search.json";
pub const DEFAULT_MAX_TURNS: usize = 10;

const REQUIRED: [&str; 3] = ["BASE_URL", "API_KEY", "MODEL_NAME"];

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing required settings: {}. Please set BASE_URL, API_KEY, and MODEL_NAME.", .0.join(", "))]
    Missing(Vec<&'static str>),
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: String,
    pub model_name: String,
    pub serpapi_key: Option<String>,
    pub serpapi_endpoint: String,
    pub max_turns: usize,
    pub trace: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let missing: Vec<&'static str> = REQUIRED
            .iter()
            .copied()
            .filter(|name| get(*name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let max_turns = match get("AGENT_MAX_TURNS") {
            None => DEFAULT_MAX_TURNS,
            Some(value) => match value.parse::<usize>() {
                Ok(turns) if turns > 0 => turns,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "AGENT_MAX_TURNS",
                        value,
                    })
                }
            },
        };

        Ok(Self {
            base_url: get("BASE_URL").unwrap_or_default(),
            api_key: get("API_KEY").unwrap_or_default(),
            model_name: get("MODEL_NAME").unwrap_or_default(),
            serpapi_key: get("SERPAPI_KEY"),
            serpapi_endpoint: get("SERPAPI_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_SERPAPI_ENDPOINT.to_string()),
            max_turns,
            trace: get("AGENT_TRACE")
                .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }
}
