//! Human summary (stderr) and machine output (stdout / files) for a finished run.

use std::path::Path;

use hfmatch_io::json::ResultDocument;
use hfmatch_io::{write_results, ExportLabels, IoError};
use hfmatch_recon::{ResultSet, Statistics};

use crate::CliError;

pub fn summary_line(stats: &Statistics) -> String {
    format!(
        "{} records — {} matched, {} unmatched, match rate {:.1}%",
        stats.total_records, stats.total_matches, stats.total_unmatches, stats.match_rate,
    )
}

pub fn print_summary(name: &str, rs: &ResultSet, stats: &Statistics) {
    eprintln!("{}: {}", name, summary_line(stats));
    eprintln!(
        "inputs: {} distinct reference entries, {} candidate entries, threshold {}",
        rs.meta.reference_count, rs.meta.candidate_count, rs.meta.threshold,
    );
}

/// Pretty JSON document of the run, as printed by `--json`.
pub fn to_json(rs: &ResultSet) -> Result<String, CliError> {
    serde_json::to_string_pretty(&ResultDocument::new(rs))
        .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))
}

pub fn write_output(path: &Path, rs: &ResultSet, labels: &ExportLabels) -> Result<(), CliError> {
    write_results(path, rs, labels).map_err(|e| match e {
        IoError::UnsupportedFormat(_) => {
            CliError::usage(e.to_string()).with_hint("output file must end in .xlsx, .csv or .json")
        }
        _ => CliError::output(e.to_string()),
    })?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_format() {
        let stats = Statistics {
            total_records: 8,
            total_matches: 6,
            total_unmatches: 2,
            match_rate: 75.0,
        };
        assert_eq!(
            summary_line(&stats),
            "8 records — 6 matched, 2 unmatched, match rate 75.0%"
        );
    }

    #[test]
    fn json_document_has_three_sections() {
        let rs = hfmatch_recon::match_lists(&["Bo CHC"], &["Bo CHC"], 70.0).unwrap();
        let v: serde_json::Value = serde_json::from_str(&to_json(&rs).unwrap()).unwrap();
        assert!(v["meta"].is_object());
        assert_eq!(v["statistics"]["total_matches"], 1);
        assert_eq!(v["records"].as_array().unwrap().len(), 1);
    }
}
