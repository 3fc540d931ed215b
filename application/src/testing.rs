//! Test doubles shared by the agent and use-case tests

use crate::ports::text_generator::{GenerationError, TextGenerator};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use transcrew_domain::{AgentRole, GenerationParams, Prompt, TranslationPrompts};

pub(crate) const ANALYSIS_REPLY: &str = r#"{"language": "English", "complexity": "simple",
    "key_terms": [{"term": "world", "translation_strategy": "monde"}]}"#;

pub(crate) const SUGGESTIONS_REPLY: &str = r#"{"suggestions": [
    {"dimension": "accuracy", "instruction": "Tighten the wording"}]}"#;

/// Reviewer reply with the same score on every dimension
pub(crate) fn review_reply(score: i32) -> String {
    format!(
        r#"{{"scores": {{"accuracy": {s}, "technical": {s}, "terminology": {s}, "language": {s}, "format": {s}}},
            "issues": [{{"dimension": "accuracy", "description": "score {s}", "suggestion": "improve"}}],
            "summary": "scored {s}"}}"#,
        s = score
    )
}

/// Which role a prompt was built for
pub(crate) fn role_of(prompt: &Prompt) -> AgentRole {
    if prompt.system == TranslationPrompts::analyzer_system() {
        AgentRole::Analyzer
    } else if prompt.system.starts_with("You are a professional translator") {
        AgentRole::Translator
    } else if prompt.system.starts_with("You are a translation reviewer") {
        AgentRole::Reviewer
    } else {
        AgentRole::Optimizer
    }
}

/// Source text embedded in a translator prompt
fn source_of(prompt: &Prompt) -> &str {
    prompt.user.split("\n\n").nth(1).unwrap_or_default()
}

/// Generator that replays scripted replies per role.
///
/// When a role's script runs out it answers with a well-formed default:
/// the translator echoes the source with a `FR:` prefix and the reviewer
/// passes with 90 everywhere.
pub(crate) struct ScriptedGenerator {
    scripts: Mutex<HashMap<AgentRole, VecDeque<Result<String, GenerationError>>>>,
    calls: Mutex<Vec<(AgentRole, Prompt, GenerationParams)>>,
}

impl ScriptedGenerator {
    pub(crate) fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn script(self, role: AgentRole, reply: Result<String, GenerationError>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(role)
            .or_default()
            .push_back(reply);
        self
    }

    pub(crate) fn reply(self, role: AgentRole, reply: impl Into<String>) -> Self {
        self.script(role, Ok(reply.into()))
    }

    pub(crate) fn fail(self, role: AgentRole, error: GenerationError) -> Self {
        self.script(role, Err(error))
    }

    /// Roles called so far, in order
    pub(crate) fn roles_called(&self) -> Vec<AgentRole> {
        self.calls.lock().unwrap().iter().map(|(r, _, _)| *r).collect()
    }

    pub(crate) fn calls(&self) -> Vec<(AgentRole, Prompt, GenerationParams)> {
        self.calls.lock().unwrap().clone()
    }

    fn default_reply(role: AgentRole, prompt: &Prompt) -> String {
        match role {
            AgentRole::Analyzer => ANALYSIS_REPLY.to_string(),
            AgentRole::Translator => {
                format!("<translation>FR:{}</translation>", source_of(prompt))
            }
            AgentRole::Reviewer => review_reply(90),
            AgentRole::Optimizer => SUGGESTIONS_REPLY.to_string(),
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        prompt: &Prompt,
        params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        let role = role_of(prompt);
        self.calls
            .lock()
            .unwrap()
            .push((role, prompt.clone(), *params));

        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&role)
            .and_then(|queue| queue.pop_front());

        tokio::task::yield_now().await;
        scripted.unwrap_or_else(|| Ok(Self::default_reply(role, prompt)))
    }
}
