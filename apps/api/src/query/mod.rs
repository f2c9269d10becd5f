//! Retrieval-augmented answering: retrieve → compose → generate.

pub mod handlers;
pub mod prompts;

use tracing::{debug, info};

use crate::errors::AppError;
use crate::index::{retrieve, RETRIEVAL_K};
use crate::ingest::Chunk;
use crate::query::prompts::{ANSWER_HEADER, CONTEXT_HEADER, QUESTION_HEADER, STYLE_INSTRUCTIONS};
use crate::state::AppState;

/// Builds the model prompt for one question about one person's résumé.
#[derive(Debug, Clone)]
pub struct PromptComposer {
    subject: String,
}

impl PromptComposer {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }

    /// Pure, single-pass interpolation: braces in `context` or `user_input`
    /// are copied verbatim.
    pub fn compose(&self, context: &str, user_input: &str) -> String {
        format!(
            "\nYou are an expert assistant for {subject}'s resume. \
             Answer naturally and professionally, like you are chatting with a human.\n\n\
             {STYLE_INSTRUCTIONS}\n\n\
             {CONTEXT_HEADER}\n{context}\n\n\
             {QUESTION_HEADER}\n{user_input}\n\n\
             {ANSWER_HEADER}\n",
            subject = self.subject,
        )
    }
}

/// Joins retrieved chunk texts into one context block, blank-line separated.
pub fn join_context(chunks: &[&Chunk]) -> String {
    chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Answers `input` against the résumé index held in `state`.
pub async fn answer_question(state: &AppState, input: &str) -> Result<String, AppError> {
    let hits = retrieve(&state.index, state.embedder.as_ref(), input, RETRIEVAL_K)
        .await
        .map_err(|e| AppError::Retrieval(e.to_string()))?;
    debug!(
        chunks = ?hits.iter().map(|c| (c.index, c.page)).collect::<Vec<_>>(),
        "Retrieved {} chunks",
        hits.len()
    );

    let prompt = state.composer.compose(&join_context(&hits), input);

    let answer = state
        .llm
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Generation(e.to_string()))?;

    info!(answer_chars = answer.chars().count(), "Answered resume question");
    Ok(answer)
}
