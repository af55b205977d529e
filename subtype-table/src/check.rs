//! Data-quality findings for a loaded table.
//!
//! None of these stop a resolver from working. They exist so edits to a
//! table (a conflicting duplicate, a typo in a label) show up in review.

use serde::Serialize;
use subtype_core::{Category, CategoryResolver, DuplicatePattern};

/// A shorter pattern contained in a longer one. The longer wins wherever both match.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Overlap {
    pub shorter: String,
    pub longer: String,
    /// Whether the two patterns lead to different categories
    pub differs: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableReport {
    pub entries: usize,
    pub normalize: String,
    pub duplicates: Vec<DuplicatePattern>,
    /// (pattern, label) pairs whose label is outside [`Category::ALL`]
    pub non_canonical: Vec<(String, String)>,
    pub overlaps: Vec<Overlap>,
}

impl TableReport {
    pub fn for_resolver(resolver: &CategoryResolver) -> Self {
        let normalize = resolver.normalize();
        let entries: Vec<_> = resolver.entries().collect();

        let non_canonical = entries
            .iter()
            .filter(|e| Category::from_label(e.category).is_none())
            .map(|e| (e.pattern.to_string(), e.category.to_string()))
            .collect();

        let keys: Vec<_> = entries.iter().map(|e| normalize.apply(e.pattern)).collect();
        let mut overlaps = Vec::new();
        for (i, short) in entries.iter().enumerate() {
            for (j, long) in entries.iter().enumerate() {
                if i != j && keys[j].len() > keys[i].len() && keys[j].contains(&*keys[i]) {
                    overlaps.push(Overlap {
                        shorter: short.pattern.to_string(),
                        longer: long.pattern.to_string(),
                        differs: short.category != long.category,
                    });
                }
            }
        }

        Self {
            entries: entries.len(),
            normalize: normalize.to_string(),
            duplicates: resolver.duplicates().to_vec(),
            non_canonical,
            overlaps,
        }
    }

    pub fn conflicting_duplicates(&self) -> usize {
        self.duplicates.iter().filter(|d| d.is_conflicting()).count()
    }

    /// No duplicates and every label canonical
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty() && self.non_canonical.is_empty()
    }
}
