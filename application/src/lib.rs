//! Application layer for transcrew
//!
//! This crate contains the four pipeline agents, port definitions, pipeline
//! configuration and the translation use case. It depends only on the domain
//! layer.

pub mod agents;
pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use agents::{Agent, AgentError, AgentPayload, AgentResult, AgentRoster};
pub use config::{PipelineConfig, PipelineConfigError};
pub use ports::{
    composite_status::CompositeStatusSink,
    status::{NoStatus, StatusEvent, StatusSink},
    text_generator::{GenerationError, TextGenerator},
};
pub use use_cases::run_translation::{
    AgentRun, FailureReason, RunTranslationError, RunTranslationUseCase, TerminalOutcome,
    TranslationInput,
};
