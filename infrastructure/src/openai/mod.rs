//! OpenAI-compatible chat-completions adapter
//!
//! [`OpenAiTextGenerator`] implements the application's
//! [`TextGenerator`](transcrew_application::TextGenerator) port over HTTP.
//! Any endpoint speaking the `/chat/completions` dialect works (OpenAI,
//! vLLM, Ollama, most gateways).

pub mod error;
pub mod generator;
pub mod protocol;

pub use error::OpenAiError;
pub use generator::{OpenAiSettings, OpenAiTextGenerator};
