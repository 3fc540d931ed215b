//! Output format value object

use serde::{Deserialize, Serialize};

/// How a terminal outcome is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Status, every review, timings and the translation
    #[default]
    Full,
    /// Only the translation text
    Translation,
    /// The outcome as JSON
    Json,
}
