//! subtype-table: the bank description table, table-file loaders, table checks and batch classification

pub mod batch;
pub mod builtin;
pub mod check;
pub mod table_file;

pub use batch::{ClassifiedRow, Summary, classify, read_descriptions_csv};
pub use builtin::{BANK_TABLE, bank_resolver};
pub use check::TableReport;
pub use table_file::{TableFormat, load_resolver, read_entries};
