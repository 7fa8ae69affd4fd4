// In-memory tables loaded from CSV or spreadsheet files

use std::collections::HashSet;
use std::path::Path;

use hfmatch_recon::config::ColumnRenames;
use serde::Serialize;

use crate::error::IoError;

/// Header row plus string cells, as read from one file (or one sheet).
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from raw records; the first record is the header row.
    ///
    /// Blank headers become `column_N` (1-based). Records with no non-blank
    /// cells are dropped.
    pub fn from_records(name: impl Into<String>, records: Vec<Vec<String>>) -> Self {
        let name = name.into();
        let mut iter = records.into_iter();
        let raw_headers = iter.next().unwrap_or_default();

        let headers: Vec<String> = raw_headers
            .into_iter()
            .enumerate()
            .map(|(i, h)| {
                let h = h.trim().to_string();
                if h.is_empty() {
                    format!("column_{}", i + 1)
                } else {
                    h
                }
            })
            .collect();

        let mut seen = HashSet::new();
        for h in &headers {
            if !seen.insert(h.as_str()) {
                log::warn!("table '{name}': duplicate header '{h}', the first one wins");
            }
        }

        let rows: Vec<Vec<String>> = iter
            .filter(|r| r.iter().any(|c| !c.trim().is_empty()))
            .collect();

        Self { name, headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// Values of `column` in row order, blank cells skipped.
    pub fn column_values(&self, column: &str) -> Result<Vec<String>, IoError> {
        let idx = self.column_index(column).ok_or_else(|| IoError::MissingColumn {
            table: self.name.clone(),
            column: column.to_string(),
            available: self.headers.clone(),
        })?;

        let mut blanks = 0usize;
        let values: Vec<String> = self
            .rows
            .iter()
            .filter_map(|row| {
                let cell = row.get(idx).map(String::as_str).unwrap_or("");
                if cell.trim().is_empty() {
                    blanks += 1;
                    None
                } else {
                    Some(cell.to_string())
                }
            })
            .collect();

        if blanks > 0 {
            log::warn!("table '{}': skipped {blanks} blank cell(s) in column '{column}'", self.name);
        }
        Ok(values)
    }

    /// Rename headers by exact name.
    pub fn rename(&mut self, renames: &ColumnRenames) -> Result<(), IoError> {
        let mut headers = self.headers.clone();
        for (from, to) in renames {
            let idx = headers.iter().position(|h| h == from).ok_or_else(|| {
                IoError::Rename(format!(
                    "table '{}': no column named '{from}' (available: {})",
                    self.name,
                    self.headers.join(", ")
                ))
            })?;
            headers[idx] = to.clone();
        }

        let mut seen = HashSet::new();
        for h in &headers {
            if !seen.insert(h.as_str()) {
                return Err(IoError::Rename(format!(
                    "table '{}': renaming leaves two columns named '{h}'",
                    self.name
                )));
            }
        }

        log::debug!("table '{}': applied {} rename(s)", self.name, renames.len());
        self.headers = headers;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load a table, picking the reader by file extension.
///
/// `sheet` selects a worksheet in spreadsheet files (first sheet when `None`)
/// and is ignored for delimited text.
pub fn load_table(path: &Path, sheet: Option<&str>) -> Result<Table, IoError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let table = match ext.as_str() {
        "csv" | "txt" => crate::csv::import(path)?,
        "tsv" => crate::csv::import_tsv(path)?,
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => crate::xlsx::import(path, sheet)?,
        _ => return Err(IoError::UnsupportedFormat(path.display().to_string())),
    };

    log::debug!(
        "loaded {}: {} column(s), {} row(s)",
        path.display(),
        table.headers.len(),
        table.row_count()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Side-by-side column listing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct TableOverview {
    pub name: String,
    pub columns: Vec<String>,
    pub row_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnComparison {
    pub reference: TableOverview,
    pub candidate: TableOverview,
    /// Headers present in both tables, in reference order.
    pub shared: Vec<String>,
}

pub fn compare_columns(reference: &Table, candidate: &Table) -> ColumnComparison {
    let shared = reference
        .headers
        .iter()
        .filter(|h| candidate.headers.contains(h))
        .cloned()
        .collect();

    ColumnComparison {
        reference: overview(reference),
        candidate: overview(candidate),
        shared,
    }
}

fn overview(t: &Table) -> TableOverview {
    TableOverview {
        name: t.name.clone(),
        columns: t.headers.clone(),
        row_count: t.row_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn records(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn sample() -> Table {
        Table::from_records(
            "mfl",
            records(&[
                &["District", "HF Name", ""],
                &["Bo", "Bo CHC", "x"],
                &["", "", ""],
                &["Kenema", "", "y"],
                &["Kenema", "Kenema Govt Hospital"],
            ]),
        )
    }

    #[test]
    fn headers_and_blank_rows() {
        let t = sample();
        assert_eq!(t.headers, vec!["District", "HF Name", "column_3"]);
        assert_eq!(t.row_count(), 3);
    }

    #[test]
    fn column_values_skip_blank_and_short_rows() {
        let t = sample();
        assert_eq!(
            t.column_values("HF Name").unwrap(),
            vec!["Bo CHC", "Kenema Govt Hospital"]
        );
        assert_eq!(t.column_values("column_3").unwrap(), vec!["x", "y"]);
    }

    #[test]
    fn missing_column_lists_available() {
        let err = sample().column_values("hf_name").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("missing column 'hf_name'"));
        assert!(msg.contains("District, HF Name"));
    }

    #[test]
    fn rename_columns() {
        let mut t = sample();
        let renames = ColumnRenames::from([("HF Name".to_string(), "hf_name".to_string())]);
        t.rename(&renames).unwrap();
        assert_eq!(t.headers[1], "hf_name");
        assert_eq!(t.column_values("hf_name").unwrap().len(), 2);
    }

    #[test]
    fn rename_unknown_column_fails() {
        let mut t = sample();
        let renames = ColumnRenames::from([("Name".to_string(), "hf_name".to_string())]);
        let err = t.rename(&renames).unwrap_err();
        assert!(err.to_string().contains("no column named 'Name'"));
        assert_eq!(t.headers[1], "HF Name", "failed rename must not modify table");
    }

    #[test]
    fn rename_collision_fails() {
        let mut t = sample();
        let renames = ColumnRenames::from([("HF Name".to_string(), "District".to_string())]);
        assert!(matches!(t.rename(&renames), Err(IoError::Rename(_))));
    }

    #[test]
    fn compare_lists_shared_headers() {
        let a = Table::from_records("a", records(&[&["id", "name", "district"], &["1", "x", "y"]]));
        let b = Table::from_records("b", records(&[&["name", "id"]]));
        let cmp = compare_columns(&a, &b);
        assert_eq!(cmp.shared, vec!["id", "name"]);
        assert_eq!(cmp.reference.row_count, 1);
        assert_eq!(cmp.candidate.row_count, 0);
    }

    #[test]
    fn load_dispatches_on_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("list.CSV");
        fs::write(&path, "name;district\nBo CHC;Bo\n").unwrap();
        let t = load_table(&path, None).unwrap();
        assert_eq!(t.headers, vec!["name", "district"]);

        let bad = dir.path().join("list.pdf");
        fs::write(&bad, "x").unwrap();
        assert!(matches!(load_table(&bad, None), Err(IoError::UnsupportedFormat(_))));
    }
}
