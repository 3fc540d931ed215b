//! Translator agent

use super::{Agent, AgentError, AgentPayload, AgentResult, timed};
use crate::ports::text_generator::TextGenerator;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use transcrew_domain::util::{extract_tagged, strip_tagged};
use transcrew_domain::{AgentRole, TranslationContext, TranslationPrompts};

const TRANSLATION_TAG: &str = "translation";
/// Reasoning blocks some models emit before answering
const THINKING_TAGS: [&str; 2] = ["think", "context_think"];

/// Produces a draft translation with the request's own generation params
pub struct TranslatorAgent {
    generator: Arc<dyn TextGenerator>,
}

impl TranslatorAgent {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    async fn translate(&self, ctx: &TranslationContext) -> Result<AgentPayload, AgentError> {
        let prompt = TranslationPrompts::translator(ctx);
        debug!(
            "Translating into {} (retry: {})",
            ctx.target_language(),
            ctx.is_retry()
        );

        let reply = self
            .generator
            .generate(&prompt, ctx.generation_params())
            .await?;

        let translation = extract_translation(&reply);
        if translation.is_empty() {
            return Err(AgentError::MalformedResponse(
                "translator returned an empty translation".to_string(),
            ));
        }
        Ok(AgentPayload::Translation(translation))
    }
}

/// Take the `<translation>` block, or the whole reply minus any reasoning
/// blocks when the model ignored the format.
fn extract_translation(reply: &str) -> String {
    if let Some(tagged) = extract_tagged(reply, TRANSLATION_TAG) {
        return tagged.to_string();
    }
    THINKING_TAGS
        .iter()
        .fold(reply.to_string(), |text, tag| strip_tagged(&text, tag))
        .trim()
        .to_string()
}

#[async_trait]
impl Agent for TranslatorAgent {
    fn role(&self) -> AgentRole {
        AgentRole::Translator
    }

    async fn invoke(&self, ctx: &TranslationContext) -> AgentResult {
        timed(self.role(), self.translate(ctx)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::text_generator::GenerationError;
    use crate::testing::ScriptedGenerator;
    use transcrew_domain::{GenerationParams, SourceText};

    fn context() -> TranslationContext {
        TranslationContext::new(
            SourceText::new("Good morning").unwrap(),
            "Spanish",
            GenerationParams::new(0.7, 0.9).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_extract_translation() {
        assert_eq!(
            extract_translation("Sure!\n<translation>\n Buenos días \n</translation>"),
            "Buenos días"
        );
        assert_eq!(
            extract_translation("<think>formal?</think>\nBuenos días"),
            "Buenos días"
        );
        assert_eq!(extract_translation("<translation> </translation>"), "");
    }

    #[tokio::test]
    async fn test_uses_request_params() {
        let generator = Arc::new(
            ScriptedGenerator::new()
                .reply(AgentRole::Translator, "<translation>Buenos días</translation>"),
        );
        let agent = TranslatorAgent::new(generator.clone());

        let result = agent.invoke(&context()).await;
        assert_eq!(
            result.payload,
            Some(AgentPayload::Translation("Buenos días".into()))
        );
        assert_eq!(generator.calls()[0].2, GenerationParams::new(0.7, 0.9).unwrap());
    }

    #[tokio::test]
    async fn test_empty_translation_is_malformed() {
        let generator = Arc::new(
            ScriptedGenerator::new().reply(AgentRole::Translator, "<translation></translation>"),
        );
        let result = TranslatorAgent::new(generator).invoke(&context()).await;
        assert!(!result.success);
        assert!(matches!(result.error, Some(AgentError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_rate_limit_surfaces_as_failure() {
        let generator = Arc::new(
            ScriptedGenerator::new()
                .fail(AgentRole::Translator, GenerationError::RateLimit("slow down".into())),
        );
        let result = TranslatorAgent::new(generator).invoke(&context()).await;
        assert!(!result.success);
        assert_eq!(result.role, AgentRole::Translator);
    }
}
