pub const WEB_SEARCH_AGENT_NAME: &str = "WebSearchAgent";

pub const WEB_SEARCH_INSTRUCTIONS: &str = "You are a web search agent that answers questions by searching the web.\n\
Use the search_web tool to find information relevant to the question.\n\
When you receive a question, search first, then reply with a concise answer based on what you found.";

pub const QUESTIONS: [&str; 4] = [
    "What is the capital of France?",
    "Who won the FIFA World Cup in 2018?",
    "How to learn Python programming?",
    "Latest news about AI",
];

const OUTPUT_FORMAT_TEMPLATE: &str = "When you have your final answer, reply with a single JSON object of type {name} and nothing else. \
It must match this JSON schema: {schema}";

pub fn output_format_prompt(name: &str, schema: &str) -> String {
    OUTPUT_FORMAT_TEMPLATE
        .replace("{name}", name)
        .replace("{schema}", schema)
}

pub fn system_prompt(instructions: &str, output_name: &str, output_schema: &str) -> String {
    format!(
        "{}\n\n{}",
        instructions.trim(),
        output_format_prompt(output_name, output_schema)
    )
}
