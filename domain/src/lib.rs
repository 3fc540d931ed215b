//! Domain layer for transcrew
//!
//! This crate contains the core business logic, entities, and value objects
//! of the translation pipeline. It has no dependencies on an async runtime,
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Translation Context
//!
//! A [`TranslationContext`] accumulates everything one translation request
//! produces: the analysis, the current draft, every review, the latest
//! optimization suggestions and the iteration count. It enforces its own
//! invariants (append-only review history, bounded iterations, immutability
//! once terminal).
//!
//! ## Quality Gate
//!
//! A [`ScoreEvaluator`] turns five reviewer sub-scores into a weighted
//! composite and a pass/fail verdict against a configured threshold.
//!
//! ```text
//! Pending → Analyzing → Translating → Reviewing ──pass──→ Passed
//!                           ↑             │fail
//!                           │             ↓
//!                      Optimizing ←── budget check ──exhausted──→ FailedMaxIterations
//! ```

pub mod agent;
pub mod analysis;
pub mod config;
pub mod core;
pub mod optimization;
pub mod prompt;
pub mod review;
pub mod translation;
pub mod util;

// Re-export commonly used types
pub use agent::AgentRole;
pub use analysis::{
    AnalysisResult, Complexity, Confidence, KeyTerm, parse_analysis_response,
};
pub use config::OutputFormat;
pub use core::{error::DomainError, source_text::SourceText};
pub use optimization::{
    OptimizationFocus, OptimizationSuggestions, Suggestion, parse_optimization_response,
};
pub use prompt::{Prompt, TranslationPrompts};
pub use review::{
    Dimension, Evaluation, IssueSeverity, ReviewDraft, ReviewIssue, ReviewResult,
    ScoreEvaluator, ScoreWeights, SubScores, composite_score, parse_review_response,
};
pub use translation::{
    context::TranslationContext, params::GenerationParams, status::TranslationStatus,
};
