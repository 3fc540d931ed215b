//! Prompt templates for the translation pipeline

use super::Prompt;
use crate::analysis::AnalysisResult;
use crate::optimization::{OptimizationFocus, OptimizationSuggestions};
use crate::review::{Dimension, ReviewResult, ScoreWeights};
use crate::translation::context::TranslationContext;
use std::fmt::Write;

/// Issues from the latest review carried into a retry
const MAX_RETRY_ISSUES: usize = 5;
/// Key-term hints on a first attempt
const MAX_KEY_TERMS: usize = 8;
/// Key-term hints once suggestions are available
const MAX_KEY_TERMS_ON_RETRY: usize = 3;

/// Templates for generating prompts for each agent role
pub struct TranslationPrompts;

impl TranslationPrompts {
    /// System prompt for the source analyzer
    pub fn analyzer_system() -> &'static str {
        r#"You are a linguistic analyst. Analyze the source text and report as JSON.

## What to report

1. **Language**: the source language
2. **Scene type**: literary, technical, business, casual, game UI, ...
3. **Complexity**: simple, moderate or complex
4. **Key terms**: terminology, proper nouns and culture-bound words, with how to render each
5. **Tone**: formality and emotional register
6. **Cultural notes**: anything a translator could trip over

## Output (JSON only)

```json
{
  "language": "Japanese",
  "scene_type": "game",
  "complexity": "moderate",
  "key_terms": [{"term": "...", "translation_strategy": "..."}],
  "tone_style": {"formality": "...", "emotion": "..."},
  "cultural_notes": ["..."]
}
```

List every placeholder, tag and special character as a key term."#
    }

    pub fn analyzer(ctx: &TranslationContext) -> Prompt {
        Prompt::new(
            Self::analyzer_system(),
            format!(
                "Target language: {}\n\nAnalyze the following text:\n\n{}",
                ctx.target_language(),
                ctx.source_text()
            ),
        )
    }

    /// Translator prompt.
    ///
    /// On a retry the optimizer's suggestions come first, followed by the
    /// latest review's issues; the analysis is reduced to a few key terms.
    pub fn translator(ctx: &TranslationContext) -> Prompt {
        let mut system = String::from(
            r#"You are a professional translator. Translate the source text into the target language.

## Principles

1. **Accuracy**: convey the full meaning, no omissions or additions
2. **Formatting**: keep every tag, placeholder and special character
3. **Terminology**: translate key terms consistently
4. **Tone**: keep the register and style of the source
5. **Fluency**: read naturally in the target language

## Technical requirements

- Keep numbering and placeholders such as `%s`, `{var}`, `<tag>` verbatim
- Keep line breaks and spacing
- Add no notes or explanations

## Output

<translation>
the translation, with all preserved markup
</translation>"#,
        );

        let suggestions = ctx.latest_suggestions().filter(|s| !s.is_empty());

        if let Some(suggestions) = suggestions {
            write_suggestions(&mut system, suggestions);
            if let Some(review) = ctx.latest_review() {
                write_review_issues(&mut system, review);
            }
        }

        if let Some(analysis) = ctx.analysis() {
            let term_limit = if suggestions.is_some() {
                MAX_KEY_TERMS_ON_RETRY
            } else {
                MAX_KEY_TERMS
            };
            write_analysis(&mut system, analysis, term_limit, suggestions.is_none());
        }

        // Without suggestions a retry still sees the issues, after the analysis
        if suggestions.is_none()
            && ctx.is_retry()
            && let Some(review) = ctx.latest_review()
        {
            write_review_issues(&mut system, review);
        }

        let mut user = format!(
            "Translate into {}:\n\n{}",
            ctx.target_language(),
            ctx.source_text()
        );
        if ctx.is_retry()
            && let Some(previous) = ctx.current_translation()
        {
            let _ = write!(user, "\n\nPrevious attempt:\n\n{}", previous);
        }

        Prompt::new(system, user)
    }

    /// Reviewer prompt. The weight table and threshold are shown to the model
    /// for calibration only; the verdict is computed locally.
    pub fn reviewer(ctx: &TranslationContext, weights: &ScoreWeights, threshold: u32) -> Prompt {
        let mut system = String::from(
            "You are a translation reviewer. Score the translation and report as JSON.\n\n\
             ## Dimensions (each scored 0-100)\n\n",
        );
        for dimension in Dimension::ALL {
            let _ = writeln!(
                system,
                "- **{}** (weight {}): {}",
                dimension.as_str(),
                weights.weight(dimension),
                dimension_guidance(dimension)
            );
        }
        let _ = write!(
            system,
            r#"
A weighted score of {threshold} or more passes.

## Output (JSON only)

```json
{{
  "scores": {{"accuracy": 0, "technical": 0, "terminology": 0, "language": 0, "format": 0}},
  "issues": [
    {{"dimension": "terminology", "severity": "critical|major|minor",
      "description": "...", "span": "offending text", "suggestion": "how to fix"}}
  ],
  "summary": "one sentence"
}}
```

List issues most important first. Report no issues for a flawless translation."#
        );

        let mut user = format!(
            "Source text:\n\n{}\n\nTranslation ({}):\n\n{}",
            ctx.source_text(),
            ctx.target_language(),
            ctx.current_translation().unwrap_or_default()
        );
        if let Some(analysis) = ctx.analysis().filter(|a| !a.key_terms.is_empty()) {
            user.push_str("\n\nKey terms to check:\n");
            for term in analysis.key_terms.iter().take(MAX_KEY_TERMS) {
                let _ = writeln!(user, "- {}", term.term);
            }
        }

        Prompt::new(system, user)
    }

    /// Optimizer prompt. Asks for instructions, not a rewritten translation.
    pub fn optimizer(
        ctx: &TranslationContext,
        review: &ReviewResult,
        focus: OptimizationFocus,
    ) -> Prompt {
        let mut system = String::from(
            r#"You are a translation optimization specialist. A reviewer rejected the translation below.
Turn the review into concrete, ordered instructions for the translator's next attempt.
Do not write the translation yourself.

## Priorities

1. Mistranslations, omissions, additions
2. Missing tags, placeholders, special characters
3. Inconsistent terminology
4. Fluency

## Output (JSON only)

```json
{
  "suggestions": [{"dimension": "technical", "instruction": "..."}],
  "rationale": "one sentence"
}
```"#,
        );
        let _ = write!(system, "\n\nFocus: {}", focus);

        let mut user = format!(
            "Source text:\n\n{}\n\nCurrent translation ({}):\n\n{}\n\nReview score: {}\n",
            ctx.source_text(),
            ctx.target_language(),
            ctx.current_translation().unwrap_or_default(),
            review.composite
        );
        for dimension in Dimension::ALL {
            let _ = writeln!(user, "- {}: {}", dimension, review.sub_scores.get(dimension));
        }
        if !review.issues.is_empty() {
            user.push_str("\nIssues:\n");
            for (i, issue) in review.issues.iter().enumerate() {
                let _ = writeln!(
                    user,
                    "{}. [{}/{}] {}",
                    i + 1,
                    issue.dimension,
                    issue.severity,
                    issue.description
                );
                if let Some(suggestion) = &issue.suggestion {
                    let _ = writeln!(user, "   Suggested: {}", suggestion);
                }
            }
        }

        Prompt::new(system, user)
    }
}

fn dimension_guidance(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Accuracy => "complete meaning, correct tone, culture handled",
        Dimension::Technical => "tags, placeholders and special characters preserved",
        Dimension::Terminology => "terms and proper nouns consistent",
        Dimension::Language => "grammar correct, fluent, style kept",
        Dimension::Format => "line breaks, spacing and punctuation correct",
    }
}

fn write_suggestions(out: &mut String, suggestions: &OptimizationSuggestions) {
    let _ = write!(
        out,
        "\n\n## Required changes (focus: {})\n\n",
        suggestions.focus
    );
    for (i, suggestion) in suggestions.suggestions.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. [{}] {}",
            i + 1,
            suggestion.dimension,
            suggestion.instruction
        );
    }
}

fn write_review_issues(out: &mut String, review: &ReviewResult) {
    if review.issues.is_empty() {
        return;
    }
    let _ = write!(
        out,
        "\n\n## Issues in the previous attempt (score {})\n\n",
        review.composite
    );
    for (i, issue) in review.issues.iter().take(MAX_RETRY_ISSUES).enumerate() {
        let _ = write!(out, "{}. [{}] {}", i + 1, issue.dimension, issue.description);
        if let Some(span) = &issue.span {
            let _ = write!(out, " (\"{}\")", span);
        }
        out.push('\n');
    }
}

fn write_analysis(out: &mut String, analysis: &AnalysisResult, term_limit: usize, full: bool) {
    out.push_str("\n\n## Reference\n\n");
    if full {
        let _ = writeln!(out, "- Source language: {}", analysis.source_language);
        let _ = writeln!(out, "- Complexity: {}", analysis.complexity);
        if let Some(scene) = &analysis.scene_type {
            let _ = writeln!(out, "- Scene: {}", scene);
        }
        if let Some(tone) = &analysis.tone {
            let _ = writeln!(out, "- Tone: {}", tone);
        }
        for note in &analysis.cultural_notes {
            let _ = writeln!(out, "- Note: {}", note);
        }
    }
    if !analysis.key_terms.is_empty() {
        out.push_str("\nKey terms:\n");
        for term in analysis.key_terms.iter().take(term_limit) {
            match &term.strategy {
                Some(strategy) => {
                    let _ = writeln!(out, "- {}: {}", term.term, strategy);
                }
                None => {
                    let _ = writeln!(out, "- {}", term.term);
                }
            }
        }
    }
}
