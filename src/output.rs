use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::time::Duration;

/// Magnifier prefix for status lines
const GLASS: &str = "🔎";

const SEPARATOR_WIDTH: usize = 60;

/// Print a startup banner
pub fn startup_banner(agent_name: &str) {
    println!();
    println!("{}", "═".repeat(50).bright_cyan());
    println!(
        "{}  {} {}",
        GLASS,
        "SEARCH AGENT".bright_cyan().bold(),
        format!("- {}", agent_name).bright_white()
    );
    println!("{}", "═".repeat(50).bright_cyan());
}

/// Print configuration info
pub fn config_item(key: &str, value: &str) {
    println!(
        "{} {} {}",
        GLASS,
        format!("{}:", key).bright_white(),
        value.bright_cyan()
    );
}

/// Print a tool invocation (magenta with arrow)
pub fn tool_call(name: &str, arguments: &str) {
    println!(
        "{} {} {}",
        GLASS,
        ">>".magenta().bold(),
        format!("{}({})", name, arguments).magenta()
    );
}

/// Print a tool result summary (blue with arrow)
pub fn tool_result(name: &str, summary: &str) {
    println!(
        "{} {} {}",
        GLASS,
        "<<".blue().bold(),
        format!("{}: {}", name, summary).blue()
    );
}

/// Print a warning (yellow)
pub fn warn(message: &str) {
    println!("{} {}", GLASS, message.yellow());
}

/// Print a fatal error (red, stderr)
pub fn fatal(message: &str) {
    eprintln!();
    eprintln!("{} {}", GLASS, message.red().bold());
}

/// Write one question/answer block. Plain text, no colour.
pub fn answer_block<W: Write>(out: &mut W, question: &str, answer: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(SEPARATOR_WIDTH))?;
    writeln!(out, "Question: {}", question)?;
    writeln!(out, "Answer:\n{}", answer)?;
    out.flush()
}

/// Spinner on stderr while a run is in flight
pub fn thinking(question: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Searching: {}", question));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
