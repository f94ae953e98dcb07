//! Summarizer Module
//!
//! Turns a sample of review texts into one natural-language summary through
//! an external text-generation provider.

mod gemini;

use async_trait::async_trait;
use thiserror::Error;

pub use gemini::GeminiSummarizer;

/// Instruction appended after the review texts.
pub const SUMMARY_INSTRUCTION: &str = "crie um resumo das avaliações do produto";

// == Summarizer Error ==
#[derive(Error, Debug)]
pub enum SummarizerError {
    /// Transport failure or timeout talking to the provider
    #[error("summarizer request failed: {0}")]
    Request(String),

    /// The provider answered with a non-success status
    #[error("summarizer returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The provider answered without any summary text
    #[error("summarizer returned no text")]
    EmptyResponse,
}

// == Summarizer ==
/// An external text-generation service.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarizes the given review texts.
    async fn summarize(&self, comments: &[String]) -> Result<String, SummarizerError>;
}

/// Builds the provider prompt: the review texts followed by the instruction.
pub fn build_prompt(comments: &[String]) -> String {
    let mut prompt = String::new();
    for comment in comments {
        prompt.push_str("- ");
        prompt.push_str(comment.trim());
        prompt.push('\n');
    }
    prompt.push_str(SUMMARY_INSTRUCTION);
    prompt
}
