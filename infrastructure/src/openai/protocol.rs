//! Chat-completions wire types.
//!
//! - **Request**: `POST {base_url}/chat/completions` with a system and a user
//!   message plus sampling parameters
//! - **Response**: the first choice's `message.content` is the generated text
//! - **Errors**: non-2xx bodies usually carry `{"error": {"message": ...}}`

use super::error::OpenAiError;
use serde::{Deserialize, Serialize};
use transcrew_application::GenerationError;
use transcrew_domain::{GenerationParams, Prompt};

/// Mild repetition penalties applied to every call
pub const FREQUENCY_PENALTY: f32 = 0.2;
pub const PRESENCE_PENALTY: f32 = 0.1;

/// Longest slice of a raw body kept in error messages
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// Chat message
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage<'a> {
    pub role: Role,
    pub content: &'a str,
}

/// Request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

pub fn build_request<'a>(
    model: &'a str,
    prompt: &'a Prompt,
    params: &GenerationParams,
    max_tokens: u32,
) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![
            ChatMessage {
                role: Role::System,
                content: &prompt.system,
            },
            ChatMessage {
                role: Role::User,
                content: &prompt.user,
            },
        ],
        temperature: params.temperature,
        top_p: params.top_p,
        max_tokens,
        frequency_penalty: FREQUENCY_PENALTY,
        presence_penalty: PRESENCE_PENALTY,
    }
}

/// Pull the generated text out of a successful response body
pub fn parse_response(body: &str) -> Result<String, OpenAiError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| OpenAiError::ParseError {
            error: e.to_string(),
            raw: clip(body),
        })?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(OpenAiError::MissingContent)
}

/// Human-readable message from an error body
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| clip(body))
}

/// Classify a non-2xx status
pub fn map_status(status: u16, message: String) -> GenerationError {
    match status {
        401 | 403 => GenerationError::Auth(message),
        429 => GenerationError::RateLimit(message),
        408 | 504 => GenerationError::Timeout,
        502 | 503 => GenerationError::Connection(format!("HTTP {}: {}", status, message)),
        _ => GenerationError::Other(format!("HTTP {}: {}", status, message)),
    }
}

fn clip(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
