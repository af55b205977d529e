//! Load mapping tables from CSV, TOML or JSON files.
//!
//! CSV:  header `pattern,category`, one row per entry
//! TOML: `[[entry]]` tables with `pattern` and `category` keys
//! JSON: array of `{"pattern": ..., "category": ...}` objects
//!
//! Row order is preserved in every format since it drives tie-breaks.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use subtype_core::{CategoryResolver, Entry, ResolverOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Toml,
    Json,
}

impl TableFormat {
    /// Pick a format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(TableFormat::Csv),
            "toml" => Ok(TableFormat::Toml),
            "json" => Ok(TableFormat::Json),
            _ => bail!(
                "unsupported table file {} (expected .csv, .toml or .json)",
                path.display()
            ),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TomlTable {
    #[serde(default)]
    entry: Vec<Entry>,
}

/// Parse table text in the given format.
pub fn parse_entries(text: &str, format: TableFormat) -> Result<Vec<Entry>> {
    match format {
        TableFormat::Csv => {
            let mut rdr = csv::ReaderBuilder::new()
                .trim(csv::Trim::Headers)
                .from_reader(text.as_bytes());
            let mut entries = Vec::new();
            for (i, row) in rdr.deserialize::<Entry>().enumerate() {
                // +2: header line plus one-based numbering
                let entry = row.with_context(|| format!("csv line {}", i + 2))?;
                entries.push(entry);
            }
            Ok(entries)
        }
        TableFormat::Toml => {
            let table: TomlTable = toml::from_str(text).context("parse toml table")?;
            Ok(table.entry)
        }
        TableFormat::Json => serde_json::from_str(text).context("parse json table"),
    }
}

/// Read every entry from a table file, in file order.
pub fn read_entries(path: impl AsRef<Path>) -> Result<Vec<Entry>> {
    let path = path.as_ref();
    let format = TableFormat::from_path(path)?;
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_entries(&text, format).with_context(|| format!("parsing {}", path.display()))
}

/// Read a table file and build a resolver from it.
pub fn load_resolver(path: impl AsRef<Path>, options: ResolverOptions) -> Result<CategoryResolver> {
    let path = path.as_ref();
    let entries = read_entries(path)?;
    let resolver = CategoryResolver::load_with(entries, options)
        .with_context(|| format!("invalid table {}", path.display()))?;
    tracing::debug!(path = %path.display(), entries = resolver.len(), "loaded table file");
    Ok(resolver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use subtype_core::{ClassificationResult, InvalidTableError, Normalize};

    fn write_temp(suffix: &str, body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(TableFormat::from_path(Path::new("t.CSV")).unwrap(), TableFormat::Csv);
        assert_eq!(TableFormat::from_path(Path::new("t.toml")).unwrap(), TableFormat::Toml);
        assert_eq!(TableFormat::from_path(Path::new("t.json")).unwrap(), TableFormat::Json);
        assert!(TableFormat::from_path(Path::new("t.yaml")).is_err());
        assert!(TableFormat::from_path(Path::new("table")).is_err());
    }

    #[test]
    fn test_csv_keeps_inner_whitespace_and_order() {
        let text = "pattern , category\nAMERICAN EXPRESS    01234,Credit Card Payment\nNomina,Payroll\n";
        let entries = parse_entries(text, TableFormat::Csv).unwrap();
        assert_eq!(
            entries,
            vec![
                Entry::new("AMERICAN EXPRESS    01234", "Credit Card Payment"),
                Entry::new("Nomina", "Payroll"),
            ]
        );
    }

    #[test]
    fn test_csv_missing_column_errors() {
        let text = "pattern\nNomina\n";
        assert!(parse_entries(text, TableFormat::Csv).is_err());
    }

    #[test]
    fn test_toml_entries() {
        let text = r#"
[[entry]]
pattern = "SPEI RECIBIDO"
category = "3rd Party Transfer"

[[entry]]
pattern = "SPEI RECIBIDOBANORTE"
category = "3rd Party Transfer"
"#;
        let entries = parse_entries(text, TableFormat::Toml).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].pattern, "SPEI RECIBIDOBANORTE");
    }

    #[test]
    fn test_toml_without_entries_is_empty() {
        assert!(parse_entries("", TableFormat::Toml).unwrap().is_empty());
    }

    #[test]
    fn test_json_entries() {
        let text = r#"[{"pattern": "Gastos Medicos", "category": "Medical Reimbursement"}]"#;
        let entries = parse_entries(text, TableFormat::Json).unwrap();
        assert_eq!(entries, vec![Entry::new("Gastos Medicos", "Medical Reimbursement")]);
    }

    #[test]
    fn test_load_resolver_from_file() {
        let f = write_temp(
            ".csv",
            "pattern,category\nReembolso Viaticos,Work Expenses Reimbursement\n",
        );
        let opts = ResolverOptions::default().with_normalize(Normalize::Casefold);
        let r = load_resolver(f.path(), opts).unwrap();
        assert_eq!(
            r.resolve("REEMBOLSO VIATICOS MARZO"),
            ClassificationResult::Matched("Work Expenses Reimbursement".to_string())
        );
    }

    #[test]
    fn test_load_resolver_empty_file_is_invalid_table() {
        let f = write_temp(".json", "[]");
        let err = load_resolver(f.path(), ResolverOptions::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<InvalidTableError>(),
            Some(&InvalidTableError::EmptyTable)
        );
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_entries("/nonexistent/table.csv").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/table.csv"));
    }
}
