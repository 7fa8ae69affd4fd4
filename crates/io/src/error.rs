use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("cannot read {}: {message}", path.display())]
    Read { path: PathBuf, message: String },

    #[error("unsupported file type: {0} (expected csv, tsv, txt, xlsx, xlsm, xls, xlsb or ods)")]
    UnsupportedFormat(String),

    #[error("sheet error: {0}")]
    Sheet(String),

    #[error("table '{table}': missing column '{column}' (available: {})", available.join(", "))]
    MissingColumn {
        table: String,
        column: String,
        available: Vec<String>,
    },

    #[error("rename error: {0}")]
    Rename(String),

    #[error("cannot write {}: {message}", path.display())]
    Write { path: PathBuf, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
