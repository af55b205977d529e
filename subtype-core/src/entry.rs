//! Table rows and the records the resolver reports about them

use serde::{Deserialize, Serialize};

/// One (pattern, category) row of a mapping table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    /// Fragment expected somewhere inside a transaction description
    pub pattern: String,
    /// Label attached to descriptions containing `pattern`
    pub category: String,
}

impl Entry {
    pub fn new(pattern: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            category: category.into(),
        }
    }
}

impl<P: Into<String>, C: Into<String>> From<(P, C)> for Entry {
    fn from((pattern, category): (P, C)) -> Self {
        Entry::new(pattern, category)
    }
}

/// A table pattern found inside a description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    pub pattern: &'a str,
    pub category: &'a str,
    /// Definition-order position in the source table
    pub index: usize,
}

/// A pattern defined more than once. The later category wins.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DuplicatePattern {
    /// Pattern text of the later definition
    pub pattern: String,
    pub first_index: usize,
    pub duplicate_index: usize,
    pub previous_category: String,
    pub category: String,
}

impl DuplicatePattern {
    /// True when the later definition changed the category
    pub fn is_conflicting(&self) -> bool {
        self.previous_category != self.category
    }
}
