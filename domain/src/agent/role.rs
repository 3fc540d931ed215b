//! Agent role value object

use serde::{Deserialize, Serialize};

/// One of the four specialised roles in the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Detects the source language, complexity and key terms
    Analyzer,
    /// Produces a translation draft
    Translator,
    /// Scores a draft on five weighted dimensions
    Reviewer,
    /// Turns a failing review into revision instructions
    Optimizer,
}

impl AgentRole {
    /// All roles in pipeline order
    pub const ALL: [AgentRole; 4] = [
        AgentRole::Analyzer,
        AgentRole::Translator,
        AgentRole::Reviewer,
        AgentRole::Optimizer,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            AgentRole::Analyzer => "analyzer",
            AgentRole::Translator => "translator",
            AgentRole::Reviewer => "reviewer",
            AgentRole::Optimizer => "optimizer",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            AgentRole::Analyzer => "Source Analyzer",
            AgentRole::Translator => "Translator",
            AgentRole::Reviewer => "Reviewer",
            AgentRole::Optimizer => "Optimizer",
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names() {
        assert_eq!(AgentRole::Analyzer.as_str(), "analyzer");
        assert_eq!(AgentRole::Optimizer.to_string(), "Optimizer");
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&AgentRole::Reviewer).unwrap();
        assert_eq!(json, "\"reviewer\"");
    }
}
