// File I/O: tables in, match results out

pub mod csv;
pub mod error;
pub mod export;
pub mod json;
pub mod table;
pub mod xlsx;

pub use error::IoError;
pub use export::{write_results, ExportLabels, ExportRow};
pub use table::{compare_columns, load_table, ColumnComparison, Table};
