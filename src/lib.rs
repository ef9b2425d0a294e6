pub mod agent;
pub mod config;
pub mod driver;
pub mod model;
pub mod output;
pub mod prompts;
pub mod search;
pub mod tool;
