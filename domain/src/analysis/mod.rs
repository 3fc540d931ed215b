//! Source analysis domain
//!
//! What the analyzer learns about the source text before translation starts:
//! its language, how hard it is, and which terms need consistent handling.

mod parsing;

pub use parsing::parse_analysis_response;

use serde::{Deserialize, Serialize};

/// How demanding the source text is to translate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
    #[default]
    Unknown,
}

impl Complexity {
    pub fn as_str(&self) -> &str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Moderate => "moderate",
            Complexity::Complex => "complex",
            Complexity::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Complexity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" | "easy" | "low" | "简单" => Ok(Complexity::Simple),
            "moderate" | "medium" | "intermediate" | "中等" => Ok(Complexity::Moderate),
            "complex" | "hard" | "high" | "difficult" | "复杂" => Ok(Complexity::Complex),
            "unknown" | "" => Ok(Complexity::Unknown),
            other => Err(format!("Unknown complexity: {}", other)),
        }
    }
}

/// How far the rest of the pipeline should trust an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    #[default]
    Normal,
    /// Input was non-linguistic or the model reply could not be parsed
    Low,
}

/// A term that must be translated consistently
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyTerm {
    pub term: String,
    /// How the analyzer suggests rendering it, if it said
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

impl KeyTerm {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            strategy: None,
        }
    }

    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }
}

/// Result of source-text analysis. Set once per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Detected source language, `"unknown"` when undetermined
    pub source_language: String,
    pub complexity: Complexity,
    /// Ordered by importance as reported
    pub key_terms: Vec<KeyTerm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cultural_notes: Vec<String>,
    pub confidence: Confidence,
}

impl AnalysisResult {
    pub const UNKNOWN_LANGUAGE: &'static str = "unknown";

    pub fn new(source_language: impl Into<String>, complexity: Complexity) -> Self {
        Self {
            source_language: source_language.into(),
            complexity,
            key_terms: Vec::new(),
            scene_type: None,
            tone: None,
            cultural_notes: Vec::new(),
            confidence: Confidence::Normal,
        }
    }

    /// Placeholder analysis for input the analyzer could not make sense of
    pub fn low_confidence() -> Self {
        Self {
            confidence: Confidence::Low,
            ..Self::new(Self::UNKNOWN_LANGUAGE, Complexity::Unknown)
        }
    }

    pub fn with_key_terms(mut self, key_terms: Vec<KeyTerm>) -> Self {
        self.key_terms = key_terms;
        self
    }

    pub fn is_low_confidence(&self) -> bool {
        self.confidence == Confidence::Low
    }
}
