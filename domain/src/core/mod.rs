//! Core domain concepts shared across all subdomains.
//!
//! - [`source_text::SourceText`]: validated text submitted for translation
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod source_text;
pub mod string;
