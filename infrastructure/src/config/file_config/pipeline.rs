//! Pipeline configuration from TOML (`[pipeline]` section)

use serde::{Deserialize, Serialize};
use transcrew_application::{PipelineConfig, PipelineConfigError};
use transcrew_domain::{ScoreEvaluator, ScoreWeights};

/// Raw quality gate and iteration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePipelineConfig {
    /// Composite score needed to pass (inclusive)
    pub pass_threshold: u32,
    /// Run optimize/retranslate cycles after a failed review
    pub enable_iteration: bool,
    /// Upper bound on optimize/retranslate cycles
    pub max_iterations: u32,
    /// Per-dimension weights, summing to 100
    pub weights: ScoreWeights,
}

impl Default for FilePipelineConfig {
    fn default() -> Self {
        Self {
            pass_threshold: ScoreEvaluator::DEFAULT_THRESHOLD,
            enable_iteration: true,
            max_iterations: PipelineConfig::DEFAULT_MAX_ITERATIONS,
            weights: ScoreWeights::default(),
        }
    }
}

impl FilePipelineConfig {
    pub fn to_pipeline_config(&self) -> Result<PipelineConfig, PipelineConfigError> {
        Ok(PipelineConfig::new(self.weights, self.pass_threshold)?
            .with_iteration(self.enable_iteration)
            .with_max_iterations(self.max_iterations))
    }
}
