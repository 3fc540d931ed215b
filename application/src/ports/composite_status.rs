//! Composite status sink: delegates to multiple sinks.
//!
//! Used to fan out status events to the terminal progress display and the
//! JSONL status log at the same time.

use super::status::{StatusEvent, StatusSink};
use crate::use_cases::run_translation::{AgentRun, TerminalOutcome};

/// A status sink that delegates to multiple inner sinks.
///
/// Holds borrowed references so that owned and borrowed sinks compose
/// without wrapper types.
///
/// ```text
/// RunTranslationUseCase.execute_with_status(input, &composite, &cancel)
///                                |
///            +-------------------+-------------------+
///            |                                       |
///     ProgressReporter                         JsonlStatusLog
///     → terminal                               → status.jsonl
/// ```
pub struct CompositeStatusSink<'a> {
    delegates: Vec<&'a dyn StatusSink>,
}

impl<'a> CompositeStatusSink<'a> {
    pub fn new(delegates: Vec<&'a dyn StatusSink>) -> Self {
        Self { delegates }
    }

    pub fn push(&mut self, sink: &'a dyn StatusSink) {
        self.delegates.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }
}

/// Macro to delegate a method call to all inner sinks.
macro_rules! delegate {
    ($self:ident, $method:ident $(, $arg:expr)*) => {
        for d in &$self.delegates {
            d.$method($($arg),*);
        }
    };
}

impl StatusSink for CompositeStatusSink<'_> {
    fn on_transition(&self, event: &StatusEvent) {
        delegate!(self, on_transition, event);
    }

    fn on_agent_finished(&self, request_id: &str, run: &AgentRun) {
        delegate!(self, on_agent_finished, request_id, run);
    }

    fn on_outcome(&self, outcome: &TerminalOutcome) {
        delegate!(self, on_outcome, outcome);
    }
}
