//! spendlens-ingest: reads transaction exports (CSV/JSON) into core records.

pub mod fields;
pub mod loader;
pub mod parsers;

pub use loader::{ExportFormat, load_transactions};
pub use parsers::csv_export::{parse_transactions_csv, parse_transactions_csv_reader};
pub use parsers::json_export::{parse_transactions_json, parse_transactions_json_str};
