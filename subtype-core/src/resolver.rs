//! Table-driven classification of transaction descriptions.
//!
//! A [`CategoryResolver`] is built once from an ordered pattern table and is
//! read-only afterwards. Resolution scans every entry for substring
//! containment; when several patterns match, the longest one wins and equal
//! lengths fall back to definition order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entry::{DuplicatePattern, Entry, Match};
use crate::error::InvalidTableError;
use crate::normalize::Normalize;

/// Outcome of resolving one description
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "category", rename_all = "snake_case")]
pub enum ClassificationResult {
    Matched(String),
    Unclassified,
}

impl ClassificationResult {
    pub fn category(&self) -> Option<&str> {
        match self {
            ClassificationResult::Matched(category) => Some(category),
            ClassificationResult::Unclassified => None,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, ClassificationResult::Matched(_))
    }

    /// The matched label, or `default` for unclassified descriptions
    pub fn label_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.category().unwrap_or(default)
    }
}

/// Construction-time settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverOptions {
    #[serde(default)]
    pub normalize: Normalize,
}

impl ResolverOptions {
    pub fn with_normalize(mut self, normalize: Normalize) -> Self {
        self.normalize = normalize;
        self
    }
}

#[derive(Debug, Clone)]
struct CompiledEntry {
    pattern: String,
    category: String,
    /// `pattern` after normalization; what descriptions are searched for
    key: String,
    key_chars: usize,
    index: usize,
}

impl CompiledEntry {
    fn as_match(&self) -> Match<'_> {
        Match {
            pattern: &self.pattern,
            category: &self.category,
            index: self.index,
        }
    }
}

/// Immutable pattern table plus the matching rules over it
#[derive(Debug, Clone)]
pub struct CategoryResolver {
    /// Ordered by first definition
    entries: Vec<CompiledEntry>,
    normalize: Normalize,
    duplicates: Vec<DuplicatePattern>,
}

impl CategoryResolver {
    /// Build a resolver with literal, case-sensitive matching.
    pub fn load<I, E>(table: I) -> Result<Self, InvalidTableError>
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry>,
    {
        Self::load_with(table, ResolverOptions::default())
    }

    /// Build a resolver from `table` in definition order.
    ///
    /// Patterns that collide after normalization are collapsed: the later
    /// category wins while the entry keeps its first position. Every
    /// collision is recorded in [`duplicates`](Self::duplicates) and logged.
    pub fn load_with<I, E>(table: I, options: ResolverOptions) -> Result<Self, InvalidTableError>
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry>,
    {
        let normalize = options.normalize;
        let mut entries: Vec<CompiledEntry> = Vec::new();
        let mut slots: HashMap<String, usize> = HashMap::new();
        let mut duplicates = Vec::new();
        let mut rows = 0usize;

        for (index, entry) in table.into_iter().map(Into::into).enumerate() {
            rows += 1;
            let Entry { pattern, category } = entry;

            if pattern.trim().is_empty() {
                return Err(InvalidTableError::EmptyPattern { index });
            }
            if category.trim().is_empty() {
                return Err(InvalidTableError::EmptyCategory { index, pattern });
            }

            let key = normalize.apply(&pattern).into_owned();
            if key.trim().is_empty() {
                return Err(InvalidTableError::EmptyPattern { index });
            }

            if let Some(&slot) = slots.get(&key) {
                let existing = &mut entries[slot];
                let duplicate = DuplicatePattern {
                    pattern: pattern.clone(),
                    first_index: existing.index,
                    duplicate_index: index,
                    previous_category: existing.category.clone(),
                    category: category.clone(),
                };
                tracing::warn!(
                    pattern = %duplicate.pattern,
                    first_index = duplicate.first_index,
                    duplicate_index = duplicate.duplicate_index,
                    conflicting = duplicate.is_conflicting(),
                    "duplicate pattern in mapping table, later definition wins"
                );
                existing.pattern = pattern;
                existing.category = category;
                duplicates.push(duplicate);
                continue;
            }

            slots.insert(key.clone(), entries.len());
            entries.push(CompiledEntry {
                key_chars: key.chars().count(),
                pattern,
                category,
                key,
                index,
            });
        }

        if rows == 0 {
            return Err(InvalidTableError::EmptyTable);
        }

        tracing::debug!(
            rows,
            entries = entries.len(),
            duplicates = duplicates.len(),
            normalize = %normalize,
            "mapping table loaded"
        );

        Ok(Self {
            entries,
            normalize,
            duplicates,
        })
    }

    /// Classify one description.
    pub fn resolve(&self, description: &str) -> ClassificationResult {
        match self.resolve_match(description) {
            Some(m) => ClassificationResult::Matched(m.category.to_string()),
            None => ClassificationResult::Unclassified,
        }
    }

    /// Classify each description independently, preserving order and length.
    pub fn resolve_all<I>(&self, descriptions: I) -> Vec<ClassificationResult>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        descriptions
            .into_iter()
            .map(|d| self.resolve(d.as_ref()))
            .collect()
    }

    /// The entry that decides `description`, if any.
    pub fn resolve_match(&self, description: &str) -> Option<Match<'_>> {
        if description.is_empty() {
            return None;
        }
        let haystack = self.normalize.apply(description);

        let mut best: Option<&CompiledEntry> = None;
        for entry in &self.entries {
            if !haystack.contains(entry.key.as_str()) {
                continue;
            }
            // Strictly longer only: on equal length the earlier entry stays.
            if best.is_none_or(|b| entry.key_chars > b.key_chars) {
                best = Some(entry);
            }
        }
        best.map(CompiledEntry::as_match)
    }

    /// Every entry found in `description`, in definition order.
    pub fn matches(&self, description: &str) -> Vec<Match<'_>> {
        if description.is_empty() {
            return Vec::new();
        }
        let haystack = self.normalize.apply(description);
        self.entries
            .iter()
            .filter(|e| haystack.contains(e.key.as_str()))
            .map(CompiledEntry::as_match)
            .collect()
    }

    /// Entries after duplicate collapse, in definition order
    pub fn entries(&self) -> impl ExactSizeIterator<Item = Match<'_>> + '_ {
        self.entries.iter().map(CompiledEntry::as_match)
    }

    pub fn duplicates(&self) -> &[DuplicatePattern] {
        &self.duplicates
    }

    pub fn normalize(&self) -> Normalize {
        self.normalize
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed resolver.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
