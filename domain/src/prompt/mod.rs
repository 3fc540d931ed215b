//! Prompt domain
//!
//! Templates for the four pipeline roles. Prompts are plain data; sending
//! them is an application concern.

mod template;

pub use template::TranslationPrompts;

use serde::{Deserialize, Serialize};

/// A system/user message pair for one generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}
