//! Request-scoped translation state
//!
//! A [`TranslationContext`] is owned by exactly one pipeline run. Agents only
//! read it; the orchestrator mutates it through the guarded methods below,
//! which keep the following true at all times:
//!
//! - the review history is append-only
//! - the analysis is written at most once
//! - a draft exists whenever the status is `Reviewing`, `Optimizing` or `Passed`
//! - nothing changes once the status is terminal

use super::params::GenerationParams;
use super::status::TranslationStatus;
use crate::analysis::AnalysisResult;
use crate::core::error::DomainError;
use crate::core::source_text::SourceText;
use crate::optimization::OptimizationSuggestions;
use crate::review::ReviewResult;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TranslationContext {
    source_text: SourceText,
    target_language: String,
    generation_params: GenerationParams,
    analysis: Option<AnalysisResult>,
    current_translation: Option<String>,
    review_history: Vec<ReviewResult>,
    latest_suggestions: Option<OptimizationSuggestions>,
    iteration_count: u32,
    status: TranslationStatus,
}

impl TranslationContext {
    pub fn new(
        source_text: SourceText,
        target_language: impl Into<String>,
        generation_params: GenerationParams,
    ) -> Result<Self, DomainError> {
        let target_language = target_language.into().trim().to_string();
        if target_language.is_empty() {
            return Err(DomainError::EmptyTargetLanguage);
        }
        generation_params.validate()?;

        Ok(Self {
            source_text,
            target_language,
            generation_params,
            analysis: None,
            current_translation: None,
            review_history: Vec::new(),
            latest_suggestions: None,
            iteration_count: 0,
            status: TranslationStatus::Pending,
        })
    }

    // ==================== Accessors ====================

    pub fn source_text(&self) -> &SourceText {
        &self.source_text
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    pub fn generation_params(&self) -> &GenerationParams {
        &self.generation_params
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn current_translation(&self) -> Option<&str> {
        self.current_translation.as_deref()
    }

    pub fn review_history(&self) -> &[ReviewResult] {
        &self.review_history
    }

    /// The most recent review; earlier ones never feed a retry
    pub fn latest_review(&self) -> Option<&ReviewResult> {
        self.review_history.last()
    }

    pub fn latest_suggestions(&self) -> Option<&OptimizationSuggestions> {
        self.latest_suggestions.as_ref()
    }

    pub fn iteration_count(&self) -> u32 {
        self.iteration_count
    }

    pub fn status(&self) -> TranslationStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// True once at least one optimize/retranslate cycle has started
    pub fn is_retry(&self) -> bool {
        self.iteration_count > 0
    }

    // ==================== Guarded mutators ====================

    fn ensure_live(&self) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::TerminalContext(self.status));
        }
        Ok(())
    }

    /// Move to `to`, returning the previous status
    pub fn transition(&mut self, to: TranslationStatus) -> Result<TranslationStatus, DomainError> {
        self.ensure_live()?;
        if !self.status.can_transition_to(to) {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        let needs_draft = matches!(
            to,
            TranslationStatus::Reviewing | TranslationStatus::Optimizing | TranslationStatus::Passed
        );
        if needs_draft && self.current_translation.is_none() {
            return Err(DomainError::ContractViolation(format!(
                "cannot enter {} without a translation",
                to
            )));
        }

        let from = self.status;
        self.status = to;
        Ok(from)
    }

    pub fn set_analysis(&mut self, analysis: AnalysisResult) -> Result<(), DomainError> {
        self.ensure_live()?;
        if self.analysis.is_some() {
            return Err(DomainError::ContractViolation(
                "analysis is already set".to_string(),
            ));
        }
        self.analysis = Some(analysis);
        Ok(())
    }

    pub fn set_translation(&mut self, translation: impl Into<String>) -> Result<(), DomainError> {
        self.ensure_live()?;
        let translation = translation.into();
        if translation.trim().is_empty() {
            return Err(DomainError::ContractViolation(
                "translation is empty".to_string(),
            ));
        }
        self.current_translation = Some(translation);
        Ok(())
    }

    pub fn record_review(&mut self, review: ReviewResult) -> Result<(), DomainError> {
        self.ensure_live()?;
        self.review_history.push(review);
        Ok(())
    }

    pub fn set_suggestions(
        &mut self,
        suggestions: OptimizationSuggestions,
    ) -> Result<(), DomainError> {
        self.ensure_live()?;
        self.latest_suggestions = Some(suggestions);
        Ok(())
    }

    /// Start another optimize/retranslate cycle, returning the new count.
    ///
    /// Fails once `max_iterations` cycles have been used.
    pub fn begin_iteration(&mut self, max_iterations: u32) -> Result<u32, DomainError> {
        self.ensure_live()?;
        if self.iteration_count >= max_iterations {
            return Err(DomainError::ContractViolation(format!(
                "iteration budget of {} exhausted",
                max_iterations
            )));
        }
        self.iteration_count += 1;
        Ok(self.iteration_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::{Evaluation, SubScores};

    fn context() -> TranslationContext {
        TranslationContext::new(
            SourceText::new("Hello, %s!").unwrap(),
            "French",
            GenerationParams::default(),
        )
        .unwrap()
    }

    fn review(composite: u32, passed: bool) -> ReviewResult {
        ReviewResult::new(
            SubScores::uniform(composite as i32),
            Evaluation { composite, passed },
            vec![],
        )
    }

    #[test]
    fn test_new_validates() {
        let source = SourceText::new("Hi").unwrap();
        assert_eq!(
            TranslationContext::new(source.clone(), "  ", GenerationParams::default()).unwrap_err(),
            DomainError::EmptyTargetLanguage
        );
        let bad = GenerationParams {
            temperature: 5.0,
            top_p: 0.1,
        };
        assert!(matches!(
            TranslationContext::new(source, "French", bad),
            Err(DomainError::InvalidGenerationParams(_))
        ));
    }

    #[test]
    fn test_reviewing_requires_draft() {
        let mut ctx = context();
        ctx.transition(TranslationStatus::Analyzing).unwrap();
        ctx.transition(TranslationStatus::Translating).unwrap();
        assert!(matches!(
            ctx.transition(TranslationStatus::Reviewing),
            Err(DomainError::ContractViolation(_))
        ));

        ctx.set_translation("Bonjour, %s !").unwrap();
        assert_eq!(
            ctx.transition(TranslationStatus::Reviewing),
            Ok(TranslationStatus::Translating)
        );
    }

    #[test]
    fn test_invalid_transition() {
        let mut ctx = context();
        assert_eq!(
            ctx.transition(TranslationStatus::Translating),
            Err(DomainError::InvalidTransition {
                from: TranslationStatus::Pending,
                to: TranslationStatus::Translating,
            })
        );
    }

    #[test]
    fn test_analysis_set_once() {
        let mut ctx = context();
        ctx.set_analysis(AnalysisResult::low_confidence()).unwrap();
        assert!(ctx.set_analysis(AnalysisResult::low_confidence()).is_err());
    }

    #[test]
    fn test_iteration_budget() {
        let mut ctx = context();
        assert_eq!(ctx.begin_iteration(2), Ok(1));
        assert_eq!(ctx.begin_iteration(2), Ok(2));
        assert!(ctx.begin_iteration(2).is_err());
        assert_eq!(ctx.iteration_count(), 2);
        assert!(ctx.begin_iteration(0).is_err());
    }

    #[test]
    fn test_history_append_only_and_latest() {
        let mut ctx = context();
        ctx.record_review(review(70, false)).unwrap();
        ctx.record_review(review(75, false)).unwrap();
        assert_eq!(ctx.review_history().len(), 2);
        assert_eq!(ctx.latest_review().map(|r| r.composite), Some(75));
    }

    #[test]
    fn test_terminal_context_is_frozen() {
        let mut ctx = context();
        ctx.transition(TranslationStatus::FailedError).unwrap();

        let frozen = DomainError::TerminalContext(TranslationStatus::FailedError);
        assert_eq!(ctx.set_translation("x"), Err(frozen.clone()));
        assert_eq!(ctx.record_review(review(90, true)), Err(frozen.clone()));
        assert_eq!(ctx.begin_iteration(3), Err(frozen.clone()));
        assert_eq!(ctx.transition(TranslationStatus::Analyzing), Err(frozen));
        assert!(ctx.review_history().is_empty());
    }
}
