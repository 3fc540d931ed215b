//! Text generation port
//!
//! Defines the interface for the one external call each agent makes.

use async_trait::async_trait;
use thiserror::Error;
use transcrew_domain::{GenerationParams, Prompt};

/// Errors that can occur during a generation call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Generation timed out")]
    Timeout,

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limited: {0}")]
    RateLimit(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl GenerationError {
    /// Whether a caller-side retry could plausibly succeed.
    ///
    /// The pipeline itself never retries; this is for adapters that wrap a
    /// generator with their own policy.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GenerationError::Timeout
                | GenerationError::RateLimit(_)
                | GenerationError::Connection(_)
        )
    }
}

/// Gateway for text generation
///
/// Implementations (adapters) live in the infrastructure layer. A call must
/// not retry internally.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &Prompt,
        params: &GenerationParams,
    ) -> Result<String, GenerationError>;
}
