//! Sampling parameters

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Sampling parameters for a generation call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            top_p: 0.1,
        }
    }
}

impl GenerationParams {
    /// Validated constructor: temperature in [0, 2], top_p in (0, 1]
    pub fn new(temperature: f32, top_p: f32) -> Result<Self, DomainError> {
        let params = Self { temperature, top_p };
        params.validate()?;
        Ok(params)
    }

    /// Near-deterministic parameters used for analysis and review
    pub fn analytical() -> Self {
        Self {
            temperature: 0.2,
            top_p: 0.1,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(DomainError::InvalidGenerationParams(format!(
                "temperature {} is outside [0, 2]",
                self.temperature
            )));
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(DomainError::InvalidGenerationParams(format!(
                "top_p {} is outside (0, 1]",
                self.top_p
            )));
        }
        Ok(())
    }
}
