//! Analyzer reply parsing

use super::{AnalysisResult, Complexity, Confidence, KeyTerm};
use crate::core::error::DomainError;
use crate::util::extract_json_object;
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct RawAnalysis {
    #[serde(default, alias = "source_language")]
    language: String,
    #[serde(default)]
    complexity: String,
    #[serde(default)]
    key_terms: Vec<RawKeyTerm>,
    #[serde(default)]
    scene_type: Option<String>,
    #[serde(default)]
    tone: Option<String>,
    #[serde(default)]
    tone_style: Option<Value>,
    #[serde(default)]
    cultural_notes: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawKeyTerm {
    Plain(String),
    Detailed {
        term: String,
        #[serde(default, alias = "translation_strategy")]
        strategy: Option<String>,
    },
}

impl RawKeyTerm {
    fn into_key_term(self) -> Option<KeyTerm> {
        let (term, strategy) = match self {
            RawKeyTerm::Plain(term) => (term, None),
            RawKeyTerm::Detailed { term, strategy } => (term, strategy),
        };
        let term = term.trim();
        if term.is_empty() {
            return None;
        }
        let mut key_term = KeyTerm::new(term);
        if let Some(strategy) = strategy.filter(|s| !s.trim().is_empty()) {
            key_term = key_term.with_strategy(strategy.trim());
        }
        Some(key_term)
    }
}

/// Flatten `tone` or a `tone_style` object (`{"formality": .., "emotion": ..}`)
/// into one line.
fn describe_tone(tone: Option<String>, tone_style: Option<Value>) -> Option<String> {
    if let Some(tone) = tone.filter(|t| !t.trim().is_empty()) {
        return Some(tone.trim().to_string());
    }
    match tone_style? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Object(map) => {
            let parts: Vec<&str> = map
                .values()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        _ => None,
    }
}

/// Parse an analyzer reply.
///
/// A reply without a detectable language is kept but marked low-confidence.
pub fn parse_analysis_response(response: &str) -> Result<AnalysisResult, DomainError> {
    let json = extract_json_object(response).ok_or_else(|| {
        DomainError::MalformedResponse("analysis reply contains no JSON object".to_string())
    })?;

    let raw: RawAnalysis = serde_json::from_str(json)
        .map_err(|e| DomainError::MalformedResponse(format!("analysis JSON: {}", e)))?;

    let language = raw.language.trim();
    let (source_language, confidence) = if language.is_empty() {
        (AnalysisResult::UNKNOWN_LANGUAGE.to_string(), Confidence::Low)
    } else {
        (language.to_string(), Confidence::Normal)
    };

    Ok(AnalysisResult {
        source_language,
        complexity: raw.complexity.parse().unwrap_or_default(),
        key_terms: raw
            .key_terms
            .into_iter()
            .filter_map(RawKeyTerm::into_key_term)
            .collect(),
        scene_type: raw.scene_type.filter(|s| !s.trim().is_empty()),
        tone: describe_tone(raw.tone, raw.tone_style),
        cultural_notes: raw
            .cultural_notes
            .into_iter()
            .filter(|n| !n.trim().is_empty())
            .collect(),
        confidence,
    })
}
