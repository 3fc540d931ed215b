//! Source analyzer agent

use super::{Agent, AgentError, AgentPayload, AgentResult, timed};
use crate::ports::text_generator::TextGenerator;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};
use transcrew_domain::{
    AgentRole, AnalysisResult, Confidence, GenerationParams, TranslationContext,
    TranslationPrompts, parse_analysis_response,
};

/// Detects language, complexity and key terms of the source text.
///
/// Only a failed generation call is fatal. Anything the model says that
/// cannot be parsed, or input without any letters, yields a low-confidence
/// analysis so translation can still proceed.
pub struct AnalyzerAgent {
    generator: Arc<dyn TextGenerator>,
}

impl AnalyzerAgent {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    async fn analyze(&self, ctx: &TranslationContext) -> Result<AgentPayload, AgentError> {
        let prompt = TranslationPrompts::analyzer(ctx);
        let reply = self
            .generator
            .generate(&prompt, &GenerationParams::analytical())
            .await?;

        let mut analysis = match parse_analysis_response(&reply) {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!("Analyzer reply unusable, continuing with low confidence: {}", e);
                AnalysisResult::low_confidence()
            }
        };

        if ctx.source_text().is_non_linguistic() {
            debug!("Source text has no letters; marking analysis low-confidence");
            analysis.confidence = Confidence::Low;
        }

        debug!(
            "Analysis: language={}, complexity={}, {} key terms",
            analysis.source_language,
            analysis.complexity,
            analysis.key_terms.len()
        );
        Ok(AgentPayload::Analysis(analysis))
    }
}

#[async_trait]
impl Agent for AnalyzerAgent {
    fn role(&self) -> AgentRole {
        AgentRole::Analyzer
    }

    async fn invoke(&self, ctx: &TranslationContext) -> AgentResult {
        timed(self.role(), self.analyze(ctx)).await
    }
}
