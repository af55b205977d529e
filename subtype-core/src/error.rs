//! Errors raised while building a resolver.
//!
//! - [`InvalidTableError`] when a mapping table cannot back a resolver.
//! - [`UnknownNormalize`] when a normalization mode name is not recognised.
//!
//! An unmatched description is never an error; see
//! [`ClassificationResult::Unclassified`].
//!
//! [`ClassificationResult::Unclassified`]: crate::ClassificationResult::Unclassified
use thiserror::Error;

/// The supplied table is structurally unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidTableError {
    #[error("mapping table is empty")]
    EmptyTable,
    #[error("entry {index}: pattern is empty")]
    EmptyPattern { index: usize },
    #[error("entry {index}: category for pattern \"{pattern}\" is empty")]
    EmptyCategory { index: usize, pattern: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown normalization \"{0}\" (expected none, casefold or casefold+diacritic-strip)")]
pub struct UnknownNormalize(pub String);
