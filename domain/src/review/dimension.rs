//! Review dimensions

use serde::{Deserialize, Serialize};

/// A quality dimension the reviewer scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Meaning conveyed completely, tone preserved
    Accuracy,
    /// Tags, placeholders and special characters intact
    Technical,
    /// Terms and proper nouns translated consistently
    Terminology,
    /// Grammar and fluency in the target language
    Language,
    /// Line breaks, spacing, punctuation
    Format,
}

impl Dimension {
    /// All dimensions in weight-table order
    pub const ALL: [Dimension; 5] = [
        Dimension::Accuracy,
        Dimension::Technical,
        Dimension::Terminology,
        Dimension::Language,
        Dimension::Format,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Dimension::Accuracy => "accuracy",
            Dimension::Technical => "technical",
            Dimension::Terminology => "terminology",
            Dimension::Language => "language",
            Dimension::Format => "format",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Dimension::Accuracy => "Accuracy",
            Dimension::Technical => "Technical",
            Dimension::Terminology => "Terminology",
            Dimension::Language => "Language",
            Dimension::Format => "Format",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Dimension {
    type Err = String;

    /// Parse a dimension name, accepting the synonyms models tend to use.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "accuracy" | "meaning" | "fidelity" => Ok(Dimension::Accuracy),
            "technical" | "tags" | "placeholders" | "placeholder" => Ok(Dimension::Technical),
            "terminology" | "term" | "terms" | "consistency" => Ok(Dimension::Terminology),
            "language" | "fluency" | "grammar" | "style" => Ok(Dimension::Language),
            "format" | "formatting" | "punctuation" | "whitespace" => Ok(Dimension::Format),
            other => Err(format!(
                "Unknown review dimension: {}. Valid: accuracy, technical, terminology, language, format",
                other
            )),
        }
    }
}
