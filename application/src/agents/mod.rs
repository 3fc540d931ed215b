//! Pipeline agents
//!
//! Each agent is a stateless role that reads the [`TranslationContext`],
//! makes exactly one generation call and returns an [`AgentResult`]. Agents
//! never mutate the context and never return `Err` or panic on a failed
//! call: failures travel inside the result and the orchestrator decides what
//! to do with them.
//!
//! | Agent | Reads | Produces |
//! |-------|-------|----------|
//! | [`AnalyzerAgent`] | source, target language | [`AnalysisResult`] |
//! | [`TranslatorAgent`] | source, analysis, latest review, suggestions | translation text |
//! | [`ReviewerAgent`] | source, translation, analysis | [`ReviewResult`] |
//! | [`OptimizerAgent`] | source, translation, latest review | [`OptimizationSuggestions`] |

mod analyzer;
mod optimizer;
mod reviewer;
mod translator;

pub use analyzer::AnalyzerAgent;
pub use optimizer::OptimizerAgent;
pub use reviewer::ReviewerAgent;
pub use translator::TranslatorAgent;

use crate::ports::text_generator::{GenerationError, TextGenerator};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use transcrew_domain::{
    AgentRole, AnalysisResult, DomainError, OptimizationSuggestions, ReviewResult,
    ScoreEvaluator, TranslationContext,
};

/// Why an agent invocation failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Validation failed: {0}")]
    Validation(DomainError),

    #[error("Contract violation: {0}")]
    ContractViolation(String),
}

impl From<DomainError> for AgentError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::MalformedResponse(message) => AgentError::MalformedResponse(message),
            DomainError::ContractViolation(message) => AgentError::ContractViolation(message),
            other => AgentError::Validation(other),
        }
    }
}

/// What a successful invocation produced
#[derive(Debug, Clone, PartialEq)]
pub enum AgentPayload {
    Analysis(AnalysisResult),
    Translation(String),
    Review(ReviewResult),
    Suggestions(OptimizationSuggestions),
}

impl AgentPayload {
    pub fn kind(&self) -> &str {
        match self {
            AgentPayload::Analysis(_) => "analysis",
            AgentPayload::Translation(_) => "translation",
            AgentPayload::Review(_) => "review",
            AgentPayload::Suggestions(_) => "suggestions",
        }
    }
}

/// Envelope returned by every agent invocation
#[derive(Debug, Clone)]
pub struct AgentResult {
    pub role: AgentRole,
    pub success: bool,
    pub payload: Option<AgentPayload>,
    pub error: Option<AgentError>,
    pub elapsed: Duration,
}

impl AgentResult {
    pub fn success(role: AgentRole, payload: AgentPayload, elapsed: Duration) -> Self {
        Self {
            role,
            success: true,
            payload: Some(payload),
            error: None,
            elapsed,
        }
    }

    pub fn failure(role: AgentRole, error: AgentError, elapsed: Duration) -> Self {
        Self {
            role,
            success: false,
            payload: None,
            error: Some(error),
            elapsed,
        }
    }

    /// Split the envelope into the payload or the error
    pub fn into_payload(self) -> Result<AgentPayload, AgentError> {
        match (self.payload, self.error) {
            (Some(payload), None) if self.success => Ok(payload),
            (_, Some(error)) => Err(error),
            _ => Err(AgentError::ContractViolation(format!(
                "{} returned an empty result",
                self.role
            ))),
        }
    }
}

/// A pipeline role
#[async_trait]
pub trait Agent: Send + Sync {
    fn role(&self) -> AgentRole;

    /// Run the role against the current context. Never fails outside the
    /// returned result.
    async fn invoke(&self, ctx: &TranslationContext) -> AgentResult;
}

/// Time `work` and wrap its outcome in an [`AgentResult`]
pub(crate) async fn timed<F>(role: AgentRole, work: F) -> AgentResult
where
    F: Future<Output = Result<AgentPayload, AgentError>>,
{
    let started = Instant::now();
    match work.await {
        Ok(payload) => AgentResult::success(role, payload, started.elapsed()),
        Err(error) => AgentResult::failure(role, error, started.elapsed()),
    }
}

/// The four agents the orchestrator dispatches to
#[derive(Clone)]
pub struct AgentRoster {
    analyzer: Arc<dyn Agent>,
    translator: Arc<dyn Agent>,
    reviewer: Arc<dyn Agent>,
    optimizer: Arc<dyn Agent>,
}

impl AgentRoster {
    pub fn new(
        analyzer: Arc<dyn Agent>,
        translator: Arc<dyn Agent>,
        reviewer: Arc<dyn Agent>,
        optimizer: Arc<dyn Agent>,
    ) -> Self {
        Self {
            analyzer,
            translator,
            reviewer,
            optimizer,
        }
    }

    /// The standard agents, all backed by one generator
    pub fn standard(generator: Arc<dyn TextGenerator>, evaluator: ScoreEvaluator) -> Self {
        Self::new(
            Arc::new(AnalyzerAgent::new(Arc::clone(&generator))),
            Arc::new(TranslatorAgent::new(Arc::clone(&generator))),
            Arc::new(ReviewerAgent::new(Arc::clone(&generator), evaluator)),
            Arc::new(OptimizerAgent::new(generator)),
        )
    }

    pub fn get(&self, role: AgentRole) -> &dyn Agent {
        match role {
            AgentRole::Analyzer => self.analyzer.as_ref(),
            AgentRole::Translator => self.translator.as_ref(),
            AgentRole::Reviewer => self.reviewer.as_ref(),
            AgentRole::Optimizer => self.optimizer.as_ref(),
        }
    }
}

impl std::fmt::Debug for AgentRoster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRoster")
            .field("analyzer", &self.analyzer.role())
            .field("translator", &self.translator.role())
            .field("reviewer", &self.reviewer.role())
            .field("optimizer", &self.optimizer.role())
            .finish()
    }
}
