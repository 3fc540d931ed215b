//! Application-level configuration.
//!
//! - [`PipelineConfig`]: quality gate and iteration policy for the
//!   translation pipeline, loaded once and shared read-only

pub mod pipeline_config;

pub use pipeline_config::{PipelineConfig, PipelineConfigError};
