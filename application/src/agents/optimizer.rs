//! Optimizer agent

use super::{Agent, AgentError, AgentPayload, AgentResult, timed};
use crate::ports::text_generator::TextGenerator;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use transcrew_domain::{
    AgentRole, OptimizationFocus, OptimizationSuggestions, TranslationContext, TranslationPrompts,
    parse_optimization_response,
};

/// Turns a failing review into instructions for the next translation.
///
/// Only valid against a failing latest review; anything else is rejected
/// before the generation call is made.
pub struct OptimizerAgent {
    generator: Arc<dyn TextGenerator>,
}

impl OptimizerAgent {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    async fn optimize(&self, ctx: &TranslationContext) -> Result<AgentPayload, AgentError> {
        let review = ctx.latest_review().ok_or_else(|| {
            AgentError::ContractViolation("optimizer invoked without a review".to_string())
        })?;
        if review.passed {
            return Err(AgentError::ContractViolation(format!(
                "optimizer invoked on a passing review (composite {})",
                review.composite
            )));
        }
        if ctx.current_translation().is_none() {
            return Err(AgentError::ContractViolation(
                "optimizer invoked without a translation".to_string(),
            ));
        }

        let focus = OptimizationFocus::from_issues(&review.issues);
        let prompt = TranslationPrompts::optimizer(ctx, review, focus);
        let reply = self
            .generator
            .generate(&prompt, ctx.generation_params())
            .await?;

        let parsed = parse_optimization_response(&reply, focus)?;
        let suggestions = if parsed.is_empty() {
            debug!("Optimizer gave no suggestions; falling back to review issues");
            OptimizationSuggestions::from_review(review).with_rationale(parsed.rationale)
        } else {
            parsed
        };

        debug!(
            "Optimization: focus={} suggestions={}",
            suggestions.focus,
            suggestions.len()
        );
        Ok(AgentPayload::Suggestions(suggestions))
    }
}

#[async_trait]
impl Agent for OptimizerAgent {
    fn role(&self) -> AgentRole {
        AgentRole::Optimizer
    }

    async fn invoke(&self, ctx: &TranslationContext) -> AgentResult {
        timed(self.role(), self.optimize(ctx)).await
    }
}
