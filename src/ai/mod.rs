//! AI text/vision service boundary.
//!
//! The core sends a structured request — text parts, optionally with
//! inline document bytes — and receives raw text that is expected to be a
//! single JSON object, sometimes wrapped in markdown code fences. The
//! parse contract is strict and fails closed: strip fences, parse,
//! validate against the expected schema variant, honor the declared
//! error flag. Partially-parsed data never passes through.

pub mod client;
pub mod parser;
pub mod prompts;
pub mod schemas;

pub use client::{AiClient, AiPart, GeminiClient, MockAiClient};
pub use parser::parse_response;
pub use schemas::*;

/// Errors from the AI service boundary.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("AI service unreachable: {0}")]
    Connection(String),

    #[error("Analysis timed out after {0}s. Please try again.")]
    Timeout(u64),

    #[error("AI service error: HTTP {status}")]
    Upstream { status: u16, body: String },

    #[error("AI service returned an empty response")]
    EmptyResponse,

    #[error("AI response is not valid JSON: {0}")]
    JsonParsing(String),

    #[error("AI response did not match the expected schema: {0}")]
    SchemaMismatch(String),

    /// The service itself flagged the request as failed (e.g. the uploaded
    /// image is not a prescription). Carries the service-provided message.
    #[error("{0}")]
    Declared(String),

    #[error("HTTP client error: {0}")]
    Http(String),
}
