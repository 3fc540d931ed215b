//! Type definitions for the RunTranslation use case.

use crate::agents::AgentError;
use serde::{Serialize, Serializer};
use std::time::Duration;
use thiserror::Error;
use transcrew_domain::{
    AgentRole, AnalysisResult, DomainError, GenerationParams, ReviewResult, TranslationStatus,
};

/// Errors returned before a request enters the pipeline.
///
/// Everything that happens inside the pipeline ends in a
/// [`TerminalOutcome`] instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunTranslationError {
    #[error("Invalid request: {0}")]
    Validation(#[from] DomainError),
}

/// Input for the RunTranslation use case
#[derive(Debug, Clone)]
pub struct TranslationInput {
    pub source_text: String,
    pub target_language: String,
    pub generation_params: GenerationParams,
    /// Caller-supplied id; a UUID is generated when absent
    pub request_id: Option<String>,
}

impl TranslationInput {
    pub fn new(source_text: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            target_language: target_language.into(),
            generation_params: GenerationParams::default(),
            request_id: None,
        }
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.generation_params = params;
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

fn serialize_display<T: std::fmt::Display, S: Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Why a request ended in `FailedError`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// An agent invocation failed
    Agent {
        role: AgentRole,
        #[serde(serialize_with = "serialize_display")]
        error: AgentError,
    },
    /// The caller cancelled the request
    Cancelled,
    /// The pipeline broke one of its own invariants
    Contract { message: String },
}

impl From<DomainError> for FailureReason {
    fn from(error: DomainError) -> Self {
        FailureReason::Contract {
            message: error.to_string(),
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Agent { role, error } => write!(f, "{} failed: {}", role, error),
            FailureReason::Cancelled => write!(f, "Cancelled"),
            FailureReason::Contract { message } => write!(f, "Internal error: {}", message),
        }
    }
}

/// Timing record of one agent invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentRun {
    pub role: AgentRole,
    pub success: bool,
    pub elapsed_ms: u64,
}

impl AgentRun {
    pub fn new(role: AgentRole, success: bool, elapsed: Duration) -> Self {
        Self {
            role,
            success,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// How a request ended
#[derive(Debug, Clone, Serialize)]
pub struct TerminalOutcome {
    pub request_id: String,
    /// `Passed`, `FailedMaxIterations` or `FailedError`
    pub status: TranslationStatus,
    /// Only set when the translation passed review
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_translation: Option<String>,
    /// The most recent draft, whatever the status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_draft: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,
    /// Every review, in order
    pub review_history: Vec<ReviewResult>,
    pub iteration_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureReason>,
    pub agent_runs: Vec<AgentRun>,
}

impl TerminalOutcome {
    pub fn is_passed(&self) -> bool {
        self.status == TranslationStatus::Passed
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.failure, Some(FailureReason::Cancelled))
    }

    pub fn final_review(&self) -> Option<&ReviewResult> {
        self.review_history.last()
    }

    /// Composite of every review, in order
    pub fn composites(&self) -> Vec<u32> {
        self.review_history.iter().map(|r| r.composite).collect()
    }

    pub fn total_elapsed_ms(&self) -> u64 {
        self.agent_runs.iter().map(|r| r.elapsed_ms).sum()
    }
}
