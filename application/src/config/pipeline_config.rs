//! Pipeline configuration: quality gate and iteration policy.
//!
//! [`PipelineConfig`] is built once at startup, wrapped in an `Arc` and
//! shared by every request. Nothing mutates it after construction.

use thiserror::Error;
use transcrew_domain::{DomainError, ScoreEvaluator, ScoreWeights};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineConfigError {
    #[error("Invalid quality gate: {0}")]
    QualityGate(#[from] DomainError),
}

/// Quality gate and iteration policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    evaluator: ScoreEvaluator,
    enable_iteration: bool,
    max_iterations: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            evaluator: ScoreEvaluator::default(),
            enable_iteration: true,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl PipelineConfig {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 3;

    /// Build a config with a validated weight table and threshold
    pub fn new(weights: ScoreWeights, threshold: u32) -> Result<Self, PipelineConfigError> {
        Ok(Self {
            evaluator: ScoreEvaluator::new(weights, threshold)?,
            ..Self::default()
        })
    }

    // ==================== Builder Methods ====================

    pub fn with_iteration(mut self, enabled: bool) -> Self {
        self.enable_iteration = enabled;
        self
    }

    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    // ==================== Accessors ====================

    pub fn evaluator(&self) -> &ScoreEvaluator {
        &self.evaluator
    }

    pub fn enable_iteration(&self) -> bool {
        self.enable_iteration
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Optimize/retranslate cycles a request may use.
    ///
    /// With iteration disabled the budget is zero: a failing first review
    /// ends the request as `FailedMaxIterations`.
    pub fn effective_max_iterations(&self) -> u32 {
        if self.enable_iteration {
            self.max_iterations
        } else {
            0
        }
    }
}
