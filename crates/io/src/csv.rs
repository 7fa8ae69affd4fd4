// CSV/TSV import and result export

use std::io::Read;
use std::path::Path;

use hfmatch_recon::model::ResultSet;

use crate::error::IoError;
use crate::export::{export_rows, ExportLabels};
use crate::table::Table;

pub fn import(path: &Path) -> Result<Table, IoError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    log::debug!("{}: delimiter {:?}", path.display(), delimiter as char);
    import_from_string(&table_name(path), &content, delimiter)
}

pub fn import_tsv(path: &Path) -> Result<Table, IoError> {
    let content = read_file_as_utf8(path)?;
    import_from_string(&table_name(path), &content, b'\t')
}

fn table_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("table")
        .to_string()
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// Each candidate (tab, semicolon, comma, pipe) is scored by how many lines share the
/// field count of the first line, weighted by that count. Needs >1 field to qualify.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        let target = counts.first().copied().unwrap_or(0);
        if target <= 1 {
            continue;
        }

        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;
        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read a file as UTF-8, falling back to Windows-1252 (Excel-exported CSVs).
/// A leading byte-order mark is dropped.
pub fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let read_err = |e: std::io::Error| IoError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let mut file = std::fs::File::open(path).map_err(read_err)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(read_err)?;

    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("{} is not valid UTF-8, decoding as Windows-1252", path.display());
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    };

    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

fn import_from_string(name: &str, content: &str, delimiter: u8) -> Result<Table, IoError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table::from_records(name, records))
}

/// Write the result table as comma-separated text with a header row.
/// Absent values are written as empty fields.
pub fn write_csv(path: &Path, rs: &ResultSet, labels: &ExportLabels) -> Result<(), IoError> {
    let mut writer = csv::WriterBuilder::new().from_path(path)?;
    writer.write_record(labels.headers())?;

    for row in export_rows(rs) {
        let score = format!("{:.2}", row.score);
        let status = row.status.to_string();
        writer.write_record([
            row.source_value.as_deref().unwrap_or(""),
            row.candidate_value.as_deref().unwrap_or(""),
            score.as_str(),
            status.as_str(),
            row.suggested_value.as_deref().unwrap_or(""),
        ])?;
    }

    writer.flush().map_err(|e| IoError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(())
}
