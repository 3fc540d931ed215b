//! Translation request state
//!
//! The request-scoped [`TranslationContext`](context::TranslationContext),
//! its lifecycle [`TranslationStatus`](status::TranslationStatus) and the
//! sampling parameters the translator runs with.

pub mod context;
pub mod params;
pub mod status;
