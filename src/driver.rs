use crate::agent::{Agent, AgentError, Runner};
use crate::output;
use crate::search::SearchResult;
use async_trait::async_trait;
use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Run failed for {question:?}: {source}")]
    Agent {
        question: String,
        #[source]
        source: AgentError,
    },
    #[error("Failed to write answer: {0}")]
    Io(#[from] std::io::Error),
}

/// Answers one question with a structured result.
#[async_trait]
pub trait Ask: Send + Sync {
    async fn ask(&self, question: &str) -> Result<SearchResult, AgentError>;
}

pub struct AgentAsker<'a> {
    runner: &'a Runner,
    agent: &'a Agent<SearchResult>,
}

impl<'a> AgentAsker<'a> {
    pub fn new(runner: &'a Runner, agent: &'a Agent<SearchResult>) -> Self {
        Self { runner, agent }
    }
}

#[async_trait]
impl Ask for AgentAsker<'_> {
    async fn ask(&self, question: &str) -> Result<SearchResult, AgentError> {
        let result = self.runner.run(self.agent, question).await?;
        Ok(result.final_output)
    }
}

/// Shows a spinner while the wrapped asker works.
pub struct WithProgress<A> {
    inner: A,
}

impl<A: Ask> WithProgress<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<A: Ask> Ask for WithProgress<A> {
    async fn ask(&self, question: &str) -> Result<SearchResult, AgentError> {
        let spinner = output::thinking(question);
        let result = self.inner.ask(question).await;
        spinner.finish_and_clear();
        result
    }
}

/// Asks each question in order and writes one block per answer.
/// Stops at the first failure; returns the number of answered questions.
pub async fn run_questions<A, W>(asker: &A, questions: &[&str], out: &mut W) -> Result<usize, DriverError>
where
    A: Ask + ?Sized,
    W: Write + Send,
{
    let mut answered = 0;
    for question in questions {
        let answer = asker
            .ask(question)
            .await
            .map_err(|source| DriverError::Agent {
                question: question.to_string(),
                source,
            })?;
        output::answer_block(&mut *out, question, &answer.snippet)?;
        answered += 1;
    }
    Ok(answered)
}
