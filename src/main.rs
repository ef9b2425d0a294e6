use search_agent::agent::{web_search_agent, Runner};
use search_agent::config::Config;
use search_agent::driver::{run_questions, AgentAsker, WithProgress};
use search_agent::output;
use search_agent::prompts::QUESTIONS;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            output::fatal(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    let agent = web_search_agent(&config);
    let runner = Runner::from_config(&config);

    output::startup_banner(agent.name());
    output::config_item("Endpoint", &config.base_url);
    output::config_item("Model", &config.model_name);
    output::config_item("Max turns", &config.max_turns.to_string());
    output::config_item("Tools", &agent.tools().len().to_string());
    if config.serpapi_key.is_none() {
        output::warn("SERPAPI_KEY is not set; search_web calls will fail");
    }

    let asker = WithProgress::new(AgentAsker::new(&runner, &agent));
    let mut stdout = std::io::stdout();
    match run_questions(&asker, &QUESTIONS, &mut stdout).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            output::fatal(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
