//! Classify descriptions in bulk and tally the outcome.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use subtype_core::{CategoryResolver, ClassificationResult};

/// A description with the category it resolved to
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClassifiedRow {
    pub description: String,
    pub result: ClassificationResult,
}

/// Read the `column` field of every row in a headered CSV file.
///
/// The header is matched case-insensitively after trimming. Rows shorter
/// than the header yield an empty description. Bytes that are not valid
/// UTF-8 (Latin-1 exports) are replaced with U+FFFD instead of failing the file.
pub fn read_descriptions_csv(path: impl AsRef<Path>, column: &str) -> Result<Vec<String>> {
    let path = path.as_ref();
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .byte_headers()
        .with_context(|| format!("reading header of {}", path.display()))?;
    let Some(idx) = headers
        .iter()
        .position(|h| String::from_utf8_lossy(h).trim().eq_ignore_ascii_case(column.trim()))
    else {
        bail!("column {:?} not found in {}", column, path.display());
    };

    let mut out = Vec::new();
    for result in rdr.byte_records() {
        let record = result.with_context(|| format!("reading {}", path.display()))?;
        let field = record.get(idx).unwrap_or_default();
        out.push(String::from_utf8_lossy(field).into_owned());
    }
    Ok(out)
}

/// Resolve each description, keeping input order.
pub fn classify<I>(resolver: &CategoryResolver, descriptions: I) -> Vec<ClassifiedRow>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    descriptions
        .into_iter()
        .map(|d| {
            let description = d.into();
            let result = resolver.resolve(&description);
            ClassifiedRow {
                description,
                result,
            }
        })
        .collect()
}

/// Counts per category, with unclassified rows kept in their own bucket
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub by_category: BTreeMap<String, usize>,
    pub unclassified: usize,
}

impl Summary {
    pub fn from_rows(rows: &[ClassifiedRow]) -> Self {
        let mut summary = Summary {
            total: rows.len(),
            ..Summary::default()
        };
        for row in rows {
            match row.result.category() {
                Some(cat) => *summary.by_category.entry(cat.to_string()).or_insert(0) += 1,
                None => summary.unclassified += 1,
            }
        }
        summary
    }

    pub fn classified(&self) -> usize {
        self.total - self.unclassified
    }
}
