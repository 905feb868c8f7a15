//! Entry point for reading a transaction export from disk.

use anyhow::Result;
use spendlens_core::Transaction;
use std::path::Path;

use crate::parsers::csv_export::parse_transactions_csv;
use crate::parsers::json_export::parse_transactions_json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// `.json` files are JSON; anything else is treated as CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }
}

/// Load every valid transaction from an export, in file order.
pub fn load_transactions(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let format = ExportFormat::from_path(path);
    let txns = match format {
        ExportFormat::Csv => parse_transactions_csv(path)?,
        ExportFormat::Json => parse_transactions_json(path)?,
    };
    tracing::info!(path = %path.display(), ?format, count = txns.len(), "loaded transactions");
    Ok(txns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("a/b.json")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("a/b.JSON")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("b.csv")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("export")), ExportFormat::Csv);
    }

    #[test]
    fn test_load_json_file() {
        let path = std::env::temp_dir().join(format!("spendlens-loader-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[{"description": "Coffee", "amount": 4, "timestamp": "2026-01-05"}]"#,
        )
        .unwrap();
        let txns = load_transactions(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].amount, 4.0);
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = load_transactions(PathBuf::from("/nonexistent/spendlens.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("spendlens.csv"));
    }
}
