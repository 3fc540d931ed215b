//! Error types for the OpenAI adapter

use thiserror::Error;
use transcrew_application::GenerationError;

/// Errors that can occur when talking to a chat-completions endpoint
#[derive(Error, Debug)]
pub enum OpenAiError {
    #[error("No API key configured (set model.api_keys or ${env})")]
    NoApiKey { env: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to parse response: {error}\nRaw response: {raw}")]
    ParseError { error: String, raw: String },

    #[error("Response has no message content")]
    MissingContent,

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
}

impl From<OpenAiError> for GenerationError {
    fn from(error: OpenAiError) -> Self {
        match error {
            OpenAiError::ParseError { .. } | OpenAiError::MissingContent => {
                GenerationError::MalformedResponse(error.to_string())
            }
            OpenAiError::NoApiKey { .. } => GenerationError::Auth(error.to_string()),
            OpenAiError::Http { status, message } => super::protocol::map_status(status, message),
            OpenAiError::Client(_) => GenerationError::Other(error.to_string()),
        }
    }
}
