//! Domain error types

use crate::review::Dimension;
use crate::translation::status::TranslationStatus;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Source text cannot be empty")]
    EmptySourceText,

    #[error("Target language cannot be empty")]
    EmptyTargetLanguage,

    #[error("Score weights must sum to 100, got {0}")]
    InvalidWeights(u64),

    #[error("{dimension} sub-score {value} is outside [0, 100]")]
    ScoreOutOfRange { dimension: Dimension, value: i32 },

    #[error("Pass threshold {0} is outside [0, 100]")]
    InvalidThreshold(u32),

    #[error("Invalid generation parameters: {0}")]
    InvalidGenerationParams(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Contract violation: {0}")]
    ContractViolation(String),

    #[error("Context is terminal ({0}) and cannot be modified")]
    TerminalContext(TranslationStatus),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: TranslationStatus,
        to: TranslationStatus,
    },
}

impl DomainError {
    /// Check if this error is a caller-facing validation error
    /// (bad input or configuration rather than a runtime contract breach).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::EmptySourceText
                | DomainError::EmptyTargetLanguage
                | DomainError::InvalidWeights(_)
                | DomainError::ScoreOutOfRange { .. }
                | DomainError::InvalidThreshold(_)
                | DomainError::InvalidGenerationParams(_)
        )
    }
}
