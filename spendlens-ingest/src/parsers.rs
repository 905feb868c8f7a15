//! Export formats understood by the loader.

pub mod csv_export;
pub mod json_export;
