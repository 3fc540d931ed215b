//! Reviewer response parsing.
//!
//! Extracts sub-scores and issues from the reviewer's JSON reply. Pure domain
//! logic: no I/O and no scoring. The composite and the verdict are computed
//! afterwards by the [`ScoreEvaluator`](super::ScoreEvaluator), never taken
//! from the model.
//!
//! Expected shape (prose or a markdown fence around it is tolerated):
//!
//! ```json
//! {
//!   "scores": {"accuracy": 90, "technical": 85, "terminology": 80, "language": 88, "format": 95},
//!   "issues": [
//!     {"dimension": "terminology", "severity": "major", "description": "...",
//!      "span": "...", "suggestion": "..."}
//!   ],
//!   "summary": "..."
//! }
//! ```

use super::dimension::Dimension;
use super::result::{IssueSeverity, ReviewIssue, ReviewResult};
use super::score::{Evaluation, SubScores};
use crate::core::error::DomainError;
use crate::util::extract_json_object;
use serde::Deserialize;

/// Reviewer output before scoring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub sub_scores: SubScores,
    pub issues: Vec<ReviewIssue>,
    pub summary: String,
}

impl ReviewDraft {
    /// Attach the evaluator's verdict
    pub fn into_result(self, evaluation: Evaluation) -> ReviewResult {
        ReviewResult::new(self.sub_scores, evaluation, self.issues).with_summary(self.summary)
    }
}

#[derive(Deserialize)]
struct RawReview {
    #[serde(alias = "sub_scores")]
    scores: RawScores,
    #[serde(default)]
    issues: Vec<RawIssue>,
    #[serde(default)]
    summary: String,
}

#[derive(Deserialize)]
struct RawScores {
    accuracy: f64,
    technical: f64,
    terminology: f64,
    language: f64,
    format: f64,
}

#[derive(Deserialize)]
struct RawIssue {
    #[serde(default, alias = "type")]
    dimension: String,
    #[serde(default)]
    severity: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    span: Option<String>,
    #[serde(default)]
    suggestion: Option<String>,
}

impl RawIssue {
    fn into_issue(self) -> Option<ReviewIssue> {
        let description = self.description.trim();
        if description.is_empty() {
            return None;
        }

        // Unknown dimensions count against accuracy, the broadest one
        let dimension = self.dimension.parse().unwrap_or(Dimension::Accuracy);
        let severity = self.severity.parse().unwrap_or(IssueSeverity::default());

        let mut issue = ReviewIssue::new(dimension, description).with_severity(severity);
        if let Some(span) = self.span.filter(|s| !s.trim().is_empty()) {
            issue = issue.with_span(span);
        }
        if let Some(suggestion) = self.suggestion.filter(|s| !s.trim().is_empty()) {
            issue = issue.with_suggestion(suggestion);
        }
        Some(issue)
    }
}

/// Round a raw score to an integer without pulling it into range.
///
/// In-range values round to nearest. Values above 100 round up and values
/// below 0 round down, so a reply of `100.4` still fails the range check.
fn integral_score(dimension: Dimension, raw: f64) -> Result<i32, DomainError> {
    if !raw.is_finite() {
        return Err(DomainError::MalformedResponse(format!(
            "{} score is not a finite number",
            dimension
        )));
    }
    let rounded = if raw > 100.0 {
        raw.ceil()
    } else if raw < 0.0 {
        raw.floor()
    } else {
        raw.round()
    };
    Ok(rounded as i32)
}

/// Parse a reviewer reply into sub-scores and issues.
///
/// Fractional in-range scores are rounded. Out-of-range scores stay out of
/// range so the evaluator can reject them.
pub fn parse_review_response(response: &str) -> Result<ReviewDraft, DomainError> {
    let json = extract_json_object(response).ok_or_else(|| {
        DomainError::MalformedResponse("review reply contains no JSON object".to_string())
    })?;

    let raw: RawReview = serde_json::from_str(json)
        .map_err(|e| DomainError::MalformedResponse(format!("review JSON: {}", e)))?;

    let scores = &raw.scores;
    let sub_scores = SubScores::new(
        integral_score(Dimension::Accuracy, scores.accuracy)?,
        integral_score(Dimension::Technical, scores.technical)?,
        integral_score(Dimension::Terminology, scores.terminology)?,
        integral_score(Dimension::Language, scores.language)?,
        integral_score(Dimension::Format, scores.format)?,
    );

    Ok(ReviewDraft {
        sub_scores,
        issues: raw.issues.into_iter().filter_map(RawIssue::into_issue).collect(),
        summary: raw.summary.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::score::ScoreEvaluator;

    #[test]
    fn test_parse_full_review() {
        let response = r#"
Here is my assessment:
```json
{
  "scores": {"accuracy": 90, "technical": 85, "terminology": 80, "language": 88, "format": 95},
  "issues": [
    {"dimension": "terminology", "severity": "major",
     "description": "'cache' translated two different ways",
     "span": "antémémoire", "suggestion": "Use 'cache' throughout"},
    {"dimension": "format", "severity": "minor", "description": "Trailing space"}
  ],
  "summary": "Solid overall"
}
```"#;
        let draft = parse_review_response(response).unwrap();
        assert_eq!(draft.sub_scores, SubScores::new(90, 85, 80, 88, 95));
        assert_eq!(draft.issues.len(), 2);
        assert_eq!(draft.issues[0].dimension, Dimension::Terminology);
        assert_eq!(draft.issues[0].span.as_deref(), Some("antémémoire"));
        assert_eq!(draft.issues[1].severity, IssueSeverity::Minor);
        assert_eq!(draft.summary, "Solid overall");
    }

    #[test]
    fn test_fractional_scores_rounded() {
        let response = r#"{"scores": {"accuracy": 89.6, "technical": 70.4, "terminology": 80, "language": 80, "format": 80}}"#;
        let draft = parse_review_response(response).unwrap();
        assert_eq!(draft.sub_scores.accuracy, 90);
        assert_eq!(draft.sub_scores.technical, 70);
        assert!(draft.issues.is_empty());
    }

    #[test]
    fn test_fractional_out_of_range_not_rounded_into_range() {
        let response = r#"{"scores": {"accuracy": 100.4, "technical": 90, "terminology": 90, "language": 90, "format": -0.4}}"#;
        let draft = parse_review_response(response).unwrap();
        assert_eq!(draft.sub_scores.accuracy, 101);
        assert_eq!(draft.sub_scores.format, -1);
        assert_eq!(
            ScoreEvaluator::default().evaluate(&draft.sub_scores),
            Err(DomainError::ScoreOutOfRange {
                dimension: Dimension::Accuracy,
                value: 101
            })
        );
    }

    #[test]
    fn test_boundary_fractions_stay_in_range() {
        let response = r#"{"scores": {"accuracy": 99.6, "technical": 0.4, "terminology": 100.0, "language": 0.0, "format": 50}}"#;
        let draft = parse_review_response(response).unwrap();
        assert_eq!(draft.sub_scores, SubScores::new(100, 0, 100, 0, 50));
        assert!(draft.sub_scores.validate().is_ok());
    }

    #[test]
    fn test_non_finite_score_is_malformed() {
        assert!(matches!(
            integral_score(Dimension::Language, f64::NAN),
            Err(DomainError::MalformedResponse(_))
        ));
        assert!(matches!(
            integral_score(Dimension::Language, f64::INFINITY),
            Err(DomainError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_out_of_range_preserved_for_evaluator() {
        let response = r#"{"scores": {"accuracy": 120, "technical": 80, "terminology": 80, "language": 80, "format": -5}}"#;
        let draft = parse_review_response(response).unwrap();
        assert_eq!(draft.sub_scores.accuracy, 120);
        assert_eq!(draft.sub_scores.format, -5);
    }

    #[test]
    fn test_unknown_dimension_and_empty_issue() {
        let response = r#"{"sub_scores": {"accuracy": 50, "technical": 50, "terminology": 50, "language": 50, "format": 50},
            "issues": [{"type": "tone", "description": "Too casual"}, {"dimension": "format", "description": "  "}]}"#;
        let draft = parse_review_response(response).unwrap();
        assert_eq!(draft.issues.len(), 1);
        assert_eq!(draft.issues[0].dimension, Dimension::Accuracy);
        assert_eq!(draft.issues[0].severity, IssueSeverity::Major);
    }

    #[test]
    fn test_missing_scores_is_malformed() {
        let err = parse_review_response(r#"{"issues": []}"#).unwrap_err();
        assert!(matches!(err, DomainError::MalformedResponse(_)));

        let err = parse_review_response("Looks great, 95/100").unwrap_err();
        assert!(matches!(err, DomainError::MalformedResponse(_)));
    }

    #[test]
    fn test_into_result_carries_verdict() {
        let draft = ReviewDraft {
            sub_scores: SubScores::uniform(82),
            issues: vec![],
            summary: "ok".to_string(),
        };
        let review = draft.into_result(Evaluation {
            composite: 82,
            passed: true,
        });
        assert!(review.passed);
        assert_eq!(review.summary, "ok");
    }
}
