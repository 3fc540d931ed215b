//! Infrastructure layer for transcrew
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the OpenAI-compatible text generator, the
//! JSONL status log, and configuration file loading.

pub mod config;
pub mod logging;
pub mod openai;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileGenerationConfig, FileModelConfig,
    FileOutputConfig, FilePipelineConfig,
};
pub use logging::JsonlStatusLog;
pub use openai::{OpenAiError, OpenAiSettings, OpenAiTextGenerator};
