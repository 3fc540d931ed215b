//! Translation lifecycle

use serde::{Deserialize, Serialize};

/// Where a translation request is in the pipeline.
///
/// ```text
/// Pending → Analyzing → Translating → Reviewing → Passed
///                           ↑             │
///                      Optimizing ←───────┤
///                                         └→ FailedMaxIterations
/// ```
///
/// Any non-terminal state may also move to `FailedError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TranslationStatus {
    #[default]
    Pending,
    Analyzing,
    Translating,
    Reviewing,
    Optimizing,
    Passed,
    FailedMaxIterations,
    FailedError,
}

impl TranslationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TranslationStatus::Pending => "pending",
            TranslationStatus::Analyzing => "analyzing",
            TranslationStatus::Translating => "translating",
            TranslationStatus::Reviewing => "reviewing",
            TranslationStatus::Optimizing => "optimizing",
            TranslationStatus::Passed => "passed",
            TranslationStatus::FailedMaxIterations => "failed_max_iterations",
            TranslationStatus::FailedError => "failed_error",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            TranslationStatus::Pending => "Pending",
            TranslationStatus::Analyzing => "Analyzing",
            TranslationStatus::Translating => "Translating",
            TranslationStatus::Reviewing => "Reviewing",
            TranslationStatus::Optimizing => "Optimizing",
            TranslationStatus::Passed => "Passed",
            TranslationStatus::FailedMaxIterations => "Failed (max iterations)",
            TranslationStatus::FailedError => "Failed (error)",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TranslationStatus::Passed
                | TranslationStatus::FailedMaxIterations
                | TranslationStatus::FailedError
        )
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            TranslationStatus::FailedMaxIterations | TranslationStatus::FailedError
        )
    }

    /// Whether the state machine allows moving from `self` to `next`
    pub fn can_transition_to(&self, next: TranslationStatus) -> bool {
        use TranslationStatus::*;

        if self.is_terminal() {
            return false;
        }
        if next == FailedError {
            return true;
        }
        matches!(
            (self, next),
            (Pending, Analyzing)
                | (Analyzing, Translating)
                | (Translating, Reviewing)
                | (Reviewing, Passed)
                | (Reviewing, Optimizing)
                | (Reviewing, FailedMaxIterations)
                | (Optimizing, Translating)
        )
    }
}

impl std::fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
