//! Weighted scoring for translation reviews

use super::dimension::Dimension;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Weight table for the five review dimensions. Must sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub accuracy: u32,
    pub technical: u32,
    pub terminology: u32,
    pub language: u32,
    pub format: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            accuracy: 35,
            technical: 25,
            terminology: 20,
            language: 15,
            format: 5,
        }
    }
}

impl ScoreWeights {
    pub fn weight(&self, dimension: Dimension) -> u32 {
        match dimension {
            Dimension::Accuracy => self.accuracy,
            Dimension::Technical => self.technical,
            Dimension::Terminology => self.terminology,
            Dimension::Language => self.language,
            Dimension::Format => self.format,
        }
    }

    /// Sum of all weights, widened so that no table can overflow it
    pub fn total(&self) -> u64 {
        Dimension::ALL.iter().map(|d| u64::from(self.weight(*d))).sum()
    }

    /// Reject any table that does not sum to exactly 100
    pub fn validate(&self) -> Result<(), DomainError> {
        match self.total() {
            100 => Ok(()),
            other => Err(DomainError::InvalidWeights(other)),
        }
    }
}

/// Per-dimension scores estimated by the reviewer, each expected in [0, 100].
///
/// Stored signed so that out-of-range estimates survive parsing and can be
/// rejected by the evaluator instead of being silently clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScores {
    pub accuracy: i32,
    pub technical: i32,
    pub terminology: i32,
    pub language: i32,
    pub format: i32,
}

impl SubScores {
    pub fn new(accuracy: i32, technical: i32, terminology: i32, language: i32, format: i32) -> Self {
        Self {
            accuracy,
            technical,
            terminology,
            language,
            format,
        }
    }

    /// Same score on every dimension
    pub fn uniform(score: i32) -> Self {
        Self::new(score, score, score, score, score)
    }

    pub fn get(&self, dimension: Dimension) -> i32 {
        match dimension {
            Dimension::Accuracy => self.accuracy,
            Dimension::Technical => self.technical,
            Dimension::Terminology => self.terminology,
            Dimension::Language => self.language,
            Dimension::Format => self.format,
        }
    }

    /// Reject the first sub-score outside [0, 100]
    pub fn validate(&self) -> Result<(), DomainError> {
        for dimension in Dimension::ALL {
            let value = self.get(dimension);
            if !(0..=100).contains(&value) {
                return Err(DomainError::ScoreOutOfRange { dimension, value });
            }
        }
        Ok(())
    }

    /// The dimension with the lowest score (first in table order on ties)
    pub fn weakest(&self) -> Dimension {
        Dimension::ALL
            .into_iter()
            .min_by_key(|d| self.get(*d))
            .unwrap_or(Dimension::Accuracy)
    }
}

/// Compute the weighted composite: `round(Σ subscore × weight / 100)`.
///
/// Pure function. Rejects invalid weight tables and out-of-range sub-scores.
pub fn composite_score(scores: &SubScores, weights: &ScoreWeights) -> Result<u32, DomainError> {
    weights.validate()?;
    scores.validate()?;

    let weighted: u32 = Dimension::ALL
        .iter()
        .map(|d| scores.get(*d) as u32 * weights.weight(*d))
        .sum();

    // weighted <= 10_000 and non-negative, so +50 then /100 is round-half-up
    Ok((weighted + 50) / 100)
}

/// Composite score and verdict for one review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub composite: u32,
    pub passed: bool,
}

/// Applies a validated weight table and pass threshold to reviewer sub-scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEvaluator {
    weights: ScoreWeights,
    threshold: u32,
}

impl Default for ScoreEvaluator {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

impl ScoreEvaluator {
    pub const DEFAULT_THRESHOLD: u32 = 80;

    pub fn new(weights: ScoreWeights, threshold: u32) -> Result<Self, DomainError> {
        weights.validate()?;
        if threshold > 100 {
            return Err(DomainError::InvalidThreshold(threshold));
        }
        Ok(Self { weights, threshold })
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Score and judge a set of sub-scores. A composite equal to the
    /// threshold passes.
    pub fn evaluate(&self, scores: &SubScores) -> Result<Evaluation, DomainError> {
        let composite = composite_score(scores, &self.weights)?;
        Ok(Evaluation {
            composite,
            passed: composite >= self.threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_100() {
        assert_eq!(ScoreWeights::default().total(), 100);
        assert!(ScoreWeights::default().validate().is_ok());
    }

    #[test]
    fn test_uniform_scores_yield_same_composite() {
        let weights = ScoreWeights::default();
        assert_eq!(composite_score(&SubScores::uniform(90), &weights), Ok(90));
        assert_eq!(composite_score(&SubScores::uniform(0), &weights), Ok(0));
        assert_eq!(composite_score(&SubScores::uniform(100), &weights), Ok(100));
    }

    #[test]
    fn test_weighted_composite() {
        // 80*35 + 90*25 + 70*20 + 60*15 + 100*5 = 2800+2250+1400+900+500 = 7850
        let scores = SubScores::new(80, 90, 70, 60, 100);
        assert_eq!(composite_score(&scores, &ScoreWeights::default()), Ok(79));
    }

    #[test]
    fn test_composite_rounds_to_nearest() {
        let weights = ScoreWeights {
            accuracy: 50,
            technical: 50,
            terminology: 0,
            language: 0,
            format: 0,
        };
        // (81*50 + 80*50) / 100 = 80.5 -> 81
        assert_eq!(
            composite_score(&SubScores::new(81, 80, 0, 0, 0), &weights),
            Ok(81)
        );
        // (81*35 + 80*65) / 100 = 80.35 -> 80
        let weights = ScoreWeights {
            accuracy: 35,
            technical: 65,
            terminology: 0,
            language: 0,
            format: 0,
        };
        assert_eq!(
            composite_score(&SubScores::new(81, 80, 0, 0, 0), &weights),
            Ok(80)
        );
    }

    #[test]
    fn test_out_of_range_rejected_not_clamped() {
        let weights = ScoreWeights::default();
        assert_eq!(
            composite_score(&SubScores::new(90, 101, 90, 90, 90), &weights),
            Err(DomainError::ScoreOutOfRange {
                dimension: Dimension::Technical,
                value: 101
            })
        );
        assert_eq!(
            composite_score(&SubScores::new(90, 90, 90, 90, -1), &weights),
            Err(DomainError::ScoreOutOfRange {
                dimension: Dimension::Format,
                value: -1
            })
        );
    }

    #[test]
    fn test_bad_weight_table_rejected() {
        let weights = ScoreWeights {
            format: 10,
            ..ScoreWeights::default()
        };
        assert_eq!(
            composite_score(&SubScores::uniform(90), &weights),
            Err(DomainError::InvalidWeights(105))
        );
        assert!(ScoreEvaluator::new(weights, 80).is_err());
    }

    #[test]
    fn test_wrapping_weight_table_rejected() {
        // Sums to 100 modulo 2^32
        let weights = ScoreWeights {
            accuracy: u32::MAX - 99,
            technical: 100,
            terminology: 100,
            language: 0,
            format: 0,
        };
        let expected = u64::from(u32::MAX) + 101;
        assert_eq!(weights.total(), expected);
        assert_eq!(weights.validate(), Err(DomainError::InvalidWeights(expected)));
        assert_eq!(
            ScoreEvaluator::new(weights, 80),
            Err(DomainError::InvalidWeights(expected))
        );
        assert!(composite_score(&SubScores::uniform(90), &weights).is_err());
    }

    #[test]
    fn test_composite_within_range_for_all_valid_inputs() {
        let tables = [
            ScoreWeights::default(),
            ScoreWeights {
                accuracy: 100,
                technical: 0,
                terminology: 0,
                language: 0,
                format: 0,
            },
            ScoreWeights {
                accuracy: 20,
                technical: 20,
                terminology: 20,
                language: 20,
                format: 20,
            },
        ];
        for weights in tables {
            for a in (0..=100).step_by(25) {
                for b in (0..=100).step_by(33) {
                    let scores = SubScores::new(a, b, 100 - a, b / 2, 100);
                    let first = composite_score(&scores, &weights).unwrap();
                    let second = composite_score(&scores, &weights).unwrap();
                    assert_eq!(first, second);
                    assert!(first <= 100);
                }
            }
        }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let evaluator = ScoreEvaluator::default();
        let at = evaluator.evaluate(&SubScores::uniform(80)).unwrap();
        assert_eq!(at.composite, 80);
        assert!(at.passed);

        let below = evaluator.evaluate(&SubScores::uniform(79)).unwrap();
        assert!(!below.passed);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        assert_eq!(
            ScoreEvaluator::new(ScoreWeights::default(), 101),
            Err(DomainError::InvalidThreshold(101))
        );
    }

    #[test]
    fn test_weakest_dimension() {
        let scores = SubScores::new(90, 60, 60, 95, 100);
        assert_eq!(scores.weakest(), Dimension::Technical);
    }
}
