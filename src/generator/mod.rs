// src/generator/mod.rs

//! AI-assisted quiz generation.

mod gemini;

pub use gemini::{
    Candidate, Content, GeminiGenerator, GenerateContentResponse, Part, QUIZ_PROMPT,
    parse_response,
};

use std::fmt;

use async_trait::async_trait;

use crate::models::quiz_item::GeneratedQuiz;

#[async_trait]
pub trait QuizGenerator: Send + Sync {
    /// Produces one quiz item. Called once per request, never retried.
    async fn generate(&self) -> Result<GeneratedQuiz, GenerateError>;
}

#[derive(Debug)]
pub enum GenerateError {
    /// No API credential configured.
    MissingApiKey,

    /// Transport failure or non-success status from the service.
    Upstream(String),

    /// Zero candidates, or a candidate without parts.
    EmptyResponse,

    /// The first part carries no text.
    NonTextPart,

    /// The cleaned text is not a quiz item object.
    MalformedOutput { raw: String, reason: String },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::MissingApiKey => write!(f, "GEMINI_API_KEY not set"),
            GenerateError::Upstream(msg) => write!(f, "generative API call failed: {}", msg),
            GenerateError::EmptyResponse => write!(f, "no response from AI"),
            GenerateError::NonTextPart => write!(f, "AI response part is not text"),
            GenerateError::MalformedOutput { reason, .. } => {
                write!(f, "AI returned malformed JSON: {}", reason)
            }
        }
    }
}

impl std::error::Error for GenerateError {}

/// Removes a leading "```json" (or bare "```") and a trailing "```" from model output.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(prefix) = text.get(..7).filter(|p| p.eq_ignore_ascii_case("```json")) {
        text = &text[prefix.len()..];
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }

    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

/// Decodes model text into a quiz item after fence stripping.
pub fn decode_quiz(raw: &str) -> Result<GeneratedQuiz, GenerateError> {
    let cleaned = strip_code_fence(raw);
    serde_json::from_str(cleaned).map_err(|e| {
        tracing::error!("JSON decode error: {}. Raw AI response: {}", e, cleaned);
        GenerateError::MalformedOutput {
            raw: cleaned.to_string(),
            reason: e.to_string(),
        }
    })
}
