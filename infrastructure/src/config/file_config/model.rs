//! Model endpoint configuration from TOML (`[model]` section)

use super::ConfigValidationError;
use crate::openai::OpenAiSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw chat-completions endpoint settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// API root; `/chat/completions` is appended
    pub base_url: String,
    pub model: String,
    /// Environment variable holding a single API key
    pub api_key_env: String,
    /// Key pool, rotated across calls. Takes precedence over `api_key_env`.
    pub api_keys: Vec<String>,
    pub timeout_seconds: u64,
    pub max_tokens: u32,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_keys: Vec::new(),
            timeout_seconds: 240,
            max_tokens: 8192,
        }
    }
}

impl FileModelConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if self.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.max_tokens == 0 {
            return Err(ConfigValidationError::InvalidMaxTokens);
        }
        Ok(())
    }

    /// Configured key pool, or the key from `api_key_env` when the pool is empty
    pub fn resolve_api_keys(&self, lookup: impl Fn(&str) -> Option<String>) -> Vec<String> {
        let pool: Vec<String> = self
            .api_keys
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect();
        if !pool.is_empty() {
            return pool;
        }

        lookup(&self.api_key_env)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .into_iter()
            .collect()
    }

    /// Adapter settings, reading the fallback key from the process environment
    pub fn to_openai_settings(&self) -> OpenAiSettings {
        OpenAiSettings {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            api_keys: self.resolve_api_keys(|name| std::env::var(name).ok()),
            api_key_env: self.api_key_env.clone(),
            timeout: Duration::from_secs(self.timeout_seconds),
            max_tokens: self.max_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_pool_takes_precedence() {
        let config = FileModelConfig {
            api_keys: vec!["a".to_string(), " ".to_string(), "b".to_string()],
            ..Default::default()
        };
        let keys = config.resolve_api_keys(|_| Some("from-env".to_string()));
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_falls_back_to_env_key() {
        let config = FileModelConfig::default();
        let keys = config.resolve_api_keys(|name| {
            assert_eq!(name, "OPENAI_API_KEY");
            Some(" sk-test ".to_string())
        });
        assert_eq!(keys, vec!["sk-test"]);
    }

    #[test]
    fn test_no_keys_anywhere() {
        let config = FileModelConfig::default();
        assert!(config.resolve_api_keys(|_| None).is_empty());
        assert!(config.resolve_api_keys(|_| Some(String::new())).is_empty());
    }

    #[test]
    fn test_validate_max_tokens() {
        let config = FileModelConfig {
            max_tokens: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidMaxTokens)
        ));
    }
}
