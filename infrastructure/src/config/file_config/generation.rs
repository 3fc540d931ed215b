//! Generation defaults from TOML (`[generation]` section)

use serde::{Deserialize, Serialize};
use transcrew_domain::GenerationParams;

/// Raw sampling defaults and target language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    /// Used when the command line doesn't name a target language
    pub target_language: String,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            temperature: params.temperature,
            top_p: params.top_p,
            target_language: "English".to_string(),
        }
    }
}
