// Result export: flatten a ResultSet into rows and write it by file extension

use std::path::Path;

use hfmatch_recon::config::OutputConfig;
use hfmatch_recon::model::{MatchRecord, MatchStatus, ResultSet};
use serde::Serialize;

use crate::error::IoError;

/// One output row. Scores are rounded to two decimals here and nowhere else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub source_value: Option<String>,
    pub candidate_value: Option<String>,
    pub score: f64,
    pub status: MatchStatus,
    pub suggested_value: Option<String>,
}

impl From<&MatchRecord> for ExportRow {
    fn from(r: &MatchRecord) -> Self {
        Self {
            source_value: r.source_value.clone(),
            candidate_value: r.candidate_value.clone(),
            score: round2(r.score),
            status: r.status,
            suggested_value: r.suggested_value().map(str::to_string),
        }
    }
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

pub fn export_rows(rs: &ResultSet) -> Vec<ExportRow> {
    rs.iter().map(ExportRow::from).collect()
}

/// Column headers for tabular exports (CSV, XLSX).
#[derive(Debug, Clone, PartialEq)]
pub struct ExportLabels {
    pub source: String,
    pub candidate: String,
    pub score: String,
    pub status: String,
    pub suggested: String,
}

impl Default for ExportLabels {
    fn default() -> Self {
        Self {
            source: "source_value".into(),
            candidate: "candidate_value".into(),
            score: "score".into(),
            status: "status".into(),
            suggested: "suggested_value".into(),
        }
    }
}

impl ExportLabels {
    /// Defaults, with the source/candidate headers taken from the job output section.
    pub fn from_output(output: &OutputConfig) -> Self {
        let mut labels = Self::default();
        if let Some(s) = &output.source_label {
            labels.source = s.clone();
        }
        if let Some(c) = &output.candidate_label {
            labels.candidate = c.clone();
        }
        labels
    }

    pub fn headers(&self) -> [&str; 5] {
        [
            self.source.as_str(),
            self.candidate.as_str(),
            self.score.as_str(),
            self.status.as_str(),
            self.suggested.as_str(),
        ]
    }
}

/// Write results, choosing the format from the extension (csv, xlsx or json).
pub fn write_results(path: &Path, rs: &ResultSet, labels: &ExportLabels) -> Result<(), IoError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => crate::csv::write_csv(path, rs, labels)?,
        "xlsx" => crate::xlsx::write_xlsx(path, rs, labels)?,
        "json" => crate::json::write_json(path, rs)?,
        _ => return Err(IoError::UnsupportedFormat(path.display().to_string())),
    }

    log::info!("wrote {} record(s) to {}", rs.len(), path.display());
    Ok(())
}
