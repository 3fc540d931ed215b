//! Source text value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Text submitted for translation (Value Object)
///
/// Guaranteed non-blank. The content is kept verbatim, including leading
/// and trailing whitespace, because formatting is part of what the
/// translation must preserve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SourceText {
    content: String,
}

impl SourceText {
    /// Create a new source text, rejecting empty or whitespace-only input
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::EmptySourceText);
        }
        Ok(Self { content })
    }

    /// Get the text content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }

    /// Number of Unicode scalar values in the text
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Whether the text contains no alphabetic characters at all
    /// (numbers, punctuation, markup only).
    pub fn is_non_linguistic(&self) -> bool {
        !self.content.chars().any(char::is_alphabetic)
    }
}

impl std::fmt::Display for SourceText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for SourceText {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        SourceText::new(s)
    }
}

impl TryFrom<&str> for SourceText {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        SourceText::new(s)
    }
}

impl From<SourceText> for String {
    fn from(text: SourceText) -> Self {
        text.content
    }
}
