//! Status notification port
//!
//! Defines the interface for observing a translation request as it moves
//! through the pipeline.

use crate::use_cases::run_translation::{AgentRun, TerminalOutcome};
use chrono::{DateTime, Utc};
use serde::Serialize;
use transcrew_domain::TranslationStatus;

/// One state transition of one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusEvent {
    pub request_id: String,
    pub from: TranslationStatus,
    pub to: TranslationStatus,
    /// Short human-readable description of what the transition carried
    pub summary: String,
    /// Optimize/retranslate cycles started so far
    pub iteration: u32,
    pub timestamp: DateTime<Utc>,
}

impl StatusEvent {
    pub fn new(
        request_id: impl Into<String>,
        from: TranslationStatus,
        to: TranslationStatus,
        summary: impl Into<String>,
        iteration: u32,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            from,
            to,
            summary: summary.into(),
            iteration,
            timestamp: Utc::now(),
        }
    }
}

/// Receiver of pipeline status events
///
/// Implementations live in the presentation and infrastructure layers.
/// Calls are made inline from the pipeline: they must return quickly and
/// must not fail.
pub trait StatusSink: Send + Sync {
    /// Called on every state transition
    fn on_transition(&self, event: &StatusEvent);

    /// Called when an agent invocation finishes, successfully or not
    fn on_agent_finished(&self, _request_id: &str, _run: &AgentRun) {}

    /// Called once per request with its terminal outcome
    fn on_outcome(&self, _outcome: &TerminalOutcome) {}
}

/// No-op sink for when status reporting is not needed
pub struct NoStatus;

impl StatusSink for NoStatus {
    fn on_transition(&self, _event: &StatusEvent) {}
}
