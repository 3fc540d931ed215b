//! Configuration file loading for transcrew
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TRANSCREW_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./transcrew.toml` or `./.transcrew.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/transcrew/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileGenerationConfig, FileModelConfig, FileOutputConfig,
    FilePipelineConfig,
};
pub use loader::ConfigLoader;
