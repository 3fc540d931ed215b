//! Reviewer agent

use super::{Agent, AgentError, AgentPayload, AgentResult, timed};
use crate::ports::text_generator::TextGenerator;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use transcrew_domain::{
    AgentRole, GenerationParams, ScoreEvaluator, TranslationContext, TranslationPrompts,
    parse_review_response,
};

/// Scores the current draft on five dimensions.
///
/// The model only estimates sub-scores and lists issues; the composite and
/// the verdict come from the [`ScoreEvaluator`].
pub struct ReviewerAgent {
    generator: Arc<dyn TextGenerator>,
    evaluator: ScoreEvaluator,
}

impl ReviewerAgent {
    pub fn new(generator: Arc<dyn TextGenerator>, evaluator: ScoreEvaluator) -> Self {
        Self {
            generator,
            evaluator,
        }
    }

    async fn review(&self, ctx: &TranslationContext) -> Result<AgentPayload, AgentError> {
        if ctx.current_translation().is_none() {
            return Err(AgentError::ContractViolation(
                "reviewer invoked without a translation".to_string(),
            ));
        }

        let prompt =
            TranslationPrompts::reviewer(ctx, self.evaluator.weights(), self.evaluator.threshold());
        let reply = self
            .generator
            .generate(&prompt, &GenerationParams::analytical())
            .await?;

        let draft = parse_review_response(&reply)?;
        let evaluation = self
            .evaluator
            .evaluate(&draft.sub_scores)
            .map_err(AgentError::Validation)?;

        debug!(
            "Review: composite={} threshold={} passed={} issues={}",
            evaluation.composite,
            self.evaluator.threshold(),
            evaluation.passed,
            draft.issues.len()
        );
        Ok(AgentPayload::Review(draft.into_result(evaluation)))
    }
}

#[async_trait]
impl Agent for ReviewerAgent {
    fn role(&self) -> AgentRole {
        AgentRole::Reviewer
    }

    async fn invoke(&self, ctx: &TranslationContext) -> AgentResult {
        timed(self.role(), self.review(ctx)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedGenerator, review_reply};
    use transcrew_domain::{DomainError, Dimension, ScoreWeights, SourceText};

    fn drafted_context() -> TranslationContext {
        let mut ctx = TranslationContext::new(
            SourceText::new("Save file").unwrap(),
            "German",
            GenerationParams::default(),
        )
        .unwrap();
        ctx.set_translation("Datei speichern").unwrap();
        ctx
    }

    fn reviewer(generator: Arc<ScriptedGenerator>) -> ReviewerAgent {
        ReviewerAgent::new(generator, ScoreEvaluator::default())
    }

    #[tokio::test]
    async fn test_composite_computed_locally() {
        let generator = Arc::new(ScriptedGenerator::new().reply(
            AgentRole::Reviewer,
            // the model's own "score" and "passed" are ignored
            r#"{"score": 99, "passed": true,
                "scores": {"accuracy": 80, "technical": 90, "terminology": 70, "language": 60, "format": 100}}"#,
        ));
        let result = reviewer(generator.clone()).invoke(&drafted_context()).await;

        let Some(AgentPayload::Review(review)) = result.payload else {
            panic!("expected review payload");
        };
        assert_eq!(review.composite, 79);
        assert!(!review.passed);
        assert_eq!(generator.calls()[0].2, GenerationParams::analytical());
    }

    #[tokio::test]
    async fn test_threshold_is_inclusive() {
        let generator = Arc::new(ScriptedGenerator::new().reply(AgentRole::Reviewer, review_reply(80)));
        let result = reviewer(generator).invoke(&drafted_context()).await;
        assert!(matches!(
            result.payload,
            Some(AgentPayload::Review(r)) if r.passed && r.composite == 80
        ));
    }

    #[tokio::test]
    async fn test_custom_weights_and_threshold() {
        let weights = ScoreWeights {
            accuracy: 100,
            technical: 0,
            terminology: 0,
            language: 0,
            format: 0,
        };
        let generator = Arc::new(ScriptedGenerator::new().reply(
            AgentRole::Reviewer,
            r#"{"scores": {"accuracy": 95, "technical": 0, "terminology": 0, "language": 0, "format": 0}}"#,
        ));
        let agent = ReviewerAgent::new(generator, ScoreEvaluator::new(weights, 95).unwrap());
        let result = agent.invoke(&drafted_context()).await;
        assert!(matches!(
            result.payload,
            Some(AgentPayload::Review(r)) if r.passed && r.composite == 95
        ));
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_validation_failure() {
        let generator = Arc::new(ScriptedGenerator::new().reply(
            AgentRole::Reviewer,
            r#"{"scores": {"accuracy": 90, "technical": 90, "terminology": 130, "language": 90, "format": 90}}"#,
        ));
        let result = reviewer(generator).invoke(&drafted_context()).await;
        assert!(!result.success);
        assert_eq!(
            result.error,
            Some(AgentError::Validation(DomainError::ScoreOutOfRange {
                dimension: Dimension::Terminology,
                value: 130
            }))
        );
    }

    #[tokio::test]
    async fn test_prose_reply_is_malformed() {
        let generator =
            Arc::new(ScriptedGenerator::new().reply(AgentRole::Reviewer, "Looks good to me!"));
        let result = reviewer(generator).invoke(&drafted_context()).await;
        assert!(matches!(result.error, Some(AgentError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_missing_translation_rejected_before_call() {
        let generator = Arc::new(ScriptedGenerator::new());
        let ctx = TranslationContext::new(
            SourceText::new("Save file").unwrap(),
            "German",
            GenerationParams::default(),
        )
        .unwrap();
        let result = reviewer(generator.clone()).invoke(&ctx).await;
        assert!(matches!(result.error, Some(AgentError::ContractViolation(_))));
        assert!(generator.calls().is_empty());
    }
}
