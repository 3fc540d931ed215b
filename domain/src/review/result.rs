//! Review result value objects

use super::dimension::Dimension;
use super::score::{Evaluation, SubScores};
use serde::{Deserialize, Serialize};

/// How serious a review issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// Mistranslation, omission, broken placeholder
    Critical,
    #[default]
    Major,
    /// Cosmetic: wording, punctuation
    Minor,
}

impl IssueSeverity {
    pub fn as_str(&self) -> &str {
        match self {
            IssueSeverity::Critical => "critical",
            IssueSeverity::Major => "major",
            IssueSeverity::Minor => "minor",
        }
    }
}

impl std::fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for IssueSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" | "severe" | "high" | "blocker" => Ok(IssueSeverity::Critical),
            "major" | "moderate" | "medium" => Ok(IssueSeverity::Major),
            "minor" | "low" | "trivial" | "nit" => Ok(IssueSeverity::Minor),
            other => Err(format!("Unknown issue severity: {}", other)),
        }
    }
}

/// One actionable finding from a review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewIssue {
    /// Dimension the issue counts against
    pub dimension: Dimension,
    pub severity: IssueSeverity,
    /// What is wrong
    pub description: String,
    /// The offending fragment of the translation, when the reviewer quoted one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<String>,
    /// How the reviewer would fix it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ReviewIssue {
    pub fn new(dimension: Dimension, description: impl Into<String>) -> Self {
        Self {
            dimension,
            severity: IssueSeverity::default(),
            description: description.into(),
            span: None,
            suggestion: None,
        }
    }

    pub fn with_severity(mut self, severity: IssueSeverity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_span(mut self, span: impl Into<String>) -> Self {
        self.span = Some(span.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Outcome of one review attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewResult {
    pub sub_scores: SubScores,
    /// Weighted composite in [0, 100]
    pub composite: u32,
    /// `composite >= threshold` at the time of review
    pub passed: bool,
    /// Ordered, most important first as reported by the reviewer
    pub issues: Vec<ReviewIssue>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
}

impl ReviewResult {
    /// Build a review from sub-scores and the evaluator's verdict on them
    pub fn new(sub_scores: SubScores, evaluation: Evaluation, issues: Vec<ReviewIssue>) -> Self {
        Self {
            sub_scores,
            composite: evaluation.composite,
            passed: evaluation.passed,
            issues,
            summary: String::new(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn is_passing(&self) -> bool {
        self.passed
    }

    /// Issues counting against one dimension
    pub fn issues_for(&self, dimension: Dimension) -> impl Iterator<Item = &ReviewIssue> {
        self.issues.iter().filter(move |i| i.dimension == dimension)
    }

    pub fn has_critical_issues(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.severity == IssueSeverity::Critical)
    }
}
