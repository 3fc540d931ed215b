//! Review and quality-gate domain
//!
//! A review scores a translation draft on five dimensions. The
//! [`ScoreEvaluator`] combines them into a composite and a verdict:
//!
//! ```text
//! composite = round( Σ subscore_i × weight_i / 100 )
//! passed    = composite >= threshold
//! ```
//!
//! | Dimension | Default weight |
//! |-----------|----------------|
//! | accuracy | 35 |
//! | technical | 25 |
//! | terminology | 20 |
//! | language | 15 |
//! | format | 5 |
//!
//! Scoring policy lives here rather than in the reviewer agent so that weight
//! and threshold changes never touch agent logic.

pub mod dimension;
pub mod parsing;
pub mod result;
pub mod score;

pub use dimension::Dimension;
pub use parsing::{ReviewDraft, parse_review_response};
pub use result::{IssueSeverity, ReviewIssue, ReviewResult};
pub use score::{Evaluation, ScoreEvaluator, ScoreWeights, SubScores, composite_score};
