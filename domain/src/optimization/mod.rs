//! Optimization domain
//!
//! After a failed review the optimizer turns the reviewer's findings into
//! targeted instructions for the next translation attempt. It never rewrites
//! the translation itself.

use crate::core::error::DomainError;
use crate::review::{Dimension, ReviewIssue, ReviewResult};
use crate::util::extract_json_object;
use serde::{Deserialize, Serialize};

/// What the next attempt should concentrate on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationFocus {
    /// Broken tags, placeholders or formatting
    TechnicalFix,
    Terminology,
    Accuracy,
    Fluency,
    #[default]
    General,
}

impl OptimizationFocus {
    /// Derive the focus from a failing review's issues.
    ///
    /// Precedence: technical/format, then terminology, accuracy, language.
    pub fn from_issues(issues: &[ReviewIssue]) -> Self {
        let has = |dims: &[Dimension]| issues.iter().any(|i| dims.contains(&i.dimension));

        if has(&[Dimension::Technical, Dimension::Format]) {
            OptimizationFocus::TechnicalFix
        } else if has(&[Dimension::Terminology]) {
            OptimizationFocus::Terminology
        } else if has(&[Dimension::Accuracy]) {
            OptimizationFocus::Accuracy
        } else if has(&[Dimension::Language]) {
            OptimizationFocus::Fluency
        } else {
            OptimizationFocus::General
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OptimizationFocus::TechnicalFix => "technical_fix",
            OptimizationFocus::Terminology => "terminology",
            OptimizationFocus::Accuracy => "accuracy",
            OptimizationFocus::Fluency => "fluency",
            OptimizationFocus::General => "general",
        }
    }
}

impl std::fmt::Display for OptimizationFocus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One instruction for the translator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub dimension: Dimension,
    pub instruction: String,
}

impl Suggestion {
    pub fn new(dimension: Dimension, instruction: impl Into<String>) -> Self {
        Self {
            dimension,
            instruction: instruction.into(),
        }
    }
}

/// Optimizer output, consumed by the next translator call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationSuggestions {
    pub focus: OptimizationFocus,
    /// Ordered, most important first
    pub suggestions: Vec<Suggestion>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rationale: String,
}

impl OptimizationSuggestions {
    pub fn new(focus: OptimizationFocus, suggestions: Vec<Suggestion>) -> Self {
        Self {
            focus,
            suggestions,
            rationale: String::new(),
        }
    }

    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = rationale.into();
        self
    }

    /// Fall back to the reviewer's own fixes (or descriptions) when the
    /// optimizer produced nothing usable.
    pub fn from_review(review: &ReviewResult) -> Self {
        let suggestions = review
            .issues
            .iter()
            .map(|issue| {
                let instruction = issue.suggestion.as_deref().unwrap_or(&issue.description);
                Suggestion::new(issue.dimension, format!("Fix: {}", instruction))
            })
            .collect();
        Self::new(OptimizationFocus::from_issues(&review.issues), suggestions)
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }
}

#[derive(Deserialize)]
struct RawSuggestions {
    #[serde(default, alias = "improvements")]
    suggestions: Vec<RawSuggestion>,
    #[serde(default)]
    rationale: String,
}

#[derive(Deserialize)]
struct RawSuggestion {
    #[serde(default, alias = "type")]
    dimension: String,
    #[serde(default, alias = "suggestion", alias = "reason")]
    instruction: String,
}

/// Parse an optimizer reply. The focus is not taken from the model; the
/// caller passes the one derived from the review.
pub fn parse_optimization_response(
    response: &str,
    focus: OptimizationFocus,
) -> Result<OptimizationSuggestions, DomainError> {
    let json = extract_json_object(response).ok_or_else(|| {
        DomainError::MalformedResponse("optimization reply contains no JSON object".to_string())
    })?;

    let raw: RawSuggestions = serde_json::from_str(json)
        .map_err(|e| DomainError::MalformedResponse(format!("optimization JSON: {}", e)))?;

    let suggestions = raw
        .suggestions
        .into_iter()
        .filter(|s| !s.instruction.trim().is_empty())
        .map(|s| {
            let dimension = s.dimension.parse().unwrap_or(Dimension::Accuracy);
            Suggestion::new(dimension, s.instruction.trim())
        })
        .collect();

    Ok(OptimizationSuggestions::new(focus, suggestions).with_rationale(raw.rationale.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::{Evaluation, SubScores};

    fn issue(dimension: Dimension) -> ReviewIssue {
        ReviewIssue::new(dimension, "problem")
    }

    #[test]
    fn test_focus_precedence() {
        assert_eq!(
            OptimizationFocus::from_issues(&[issue(Dimension::Accuracy), issue(Dimension::Format)]),
            OptimizationFocus::TechnicalFix
        );
        assert_eq!(
            OptimizationFocus::from_issues(&[
                issue(Dimension::Language),
                issue(Dimension::Terminology)
            ]),
            OptimizationFocus::Terminology
        );
        assert_eq!(
            OptimizationFocus::from_issues(&[issue(Dimension::Language)]),
            OptimizationFocus::Fluency
        );
        assert_eq!(OptimizationFocus::from_issues(&[]), OptimizationFocus::General);
    }

    #[test]
    fn test_parse_suggestions() {
        let response = r#"Analysis done.
{"suggestions": [
    {"dimension": "terminology", "instruction": "Render 'cache' as 'cache'"},
    {"type": "grammar", "reason": "Use the subjunctive after 'bien que'"},
    {"dimension": "format", "instruction": " "}
], "rationale": "Mostly terminology drift"}"#;
        let parsed =
            parse_optimization_response(response, OptimizationFocus::Terminology).unwrap();
        assert_eq!(parsed.focus, OptimizationFocus::Terminology);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.suggestions[1].dimension, Dimension::Language);
        assert_eq!(parsed.rationale, "Mostly terminology drift");
    }

    #[test]
    fn test_parse_without_json_fails() {
        assert!(parse_optimization_response("Just fix it", OptimizationFocus::General).is_err());
    }

    #[test]
    fn test_from_review_prefers_issue_suggestion() {
        let review = ReviewResult::new(
            SubScores::uniform(70),
            Evaluation {
                composite: 70,
                passed: false,
            },
            vec![
                ReviewIssue::new(Dimension::Technical, "Dropped {name}")
                    .with_suggestion("Keep {name} verbatim"),
                ReviewIssue::new(Dimension::Language, "Stiff phrasing"),
            ],
        );
        let suggestions = OptimizationSuggestions::from_review(&review);
        assert_eq!(suggestions.focus, OptimizationFocus::TechnicalFix);
        assert_eq!(suggestions.suggestions[0].instruction, "Fix: Keep {name} verbatim");
        assert_eq!(suggestions.suggestions[1].instruction, "Fix: Stiff phrasing");
    }
}
