//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod generation;
mod model;
mod output;
mod pipeline;

pub use generation::FileGenerationConfig;
pub use model::FileModelConfig;
pub use output::FileOutputConfig;
pub use pipeline::FilePipelineConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use transcrew_application::{PipelineConfig, PipelineConfigError};
use transcrew_domain::{DomainError, GenerationParams};

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("[pipeline] {0}")]
    Pipeline(#[from] PipelineConfigError),

    #[error("[generation] {0}")]
    Generation(DomainError),

    #[error("generation.target_language cannot be empty")]
    EmptyTargetLanguage,

    #[error("model.model cannot be empty")]
    EmptyModelName,

    #[error("model.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("model.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("model.max_tokens cannot be 0")]
    InvalidMaxTokens,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Quality gate and iteration policy
    pub pipeline: FilePipelineConfig,
    /// Default sampling parameters and target language
    pub generation: FileGenerationConfig,
    /// Chat-completions endpoint and credentials
    pub model: FileModelConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.to_pipeline_config()?;
        self.generation_params()?;
        if self.generation.target_language.trim().is_empty() {
            return Err(ConfigValidationError::EmptyTargetLanguage);
        }
        self.model.validate()
    }

    /// Build the shared pipeline configuration
    pub fn to_pipeline_config(&self) -> Result<PipelineConfig, ConfigValidationError> {
        Ok(self.pipeline.to_pipeline_config()?)
    }

    /// Default generation parameters for requests that don't set their own
    pub fn generation_params(&self) -> Result<GenerationParams, ConfigValidationError> {
        GenerationParams::new(self.generation.temperature, self.generation.top_p)
            .map_err(ConfigValidationError::Generation)
    }
}
