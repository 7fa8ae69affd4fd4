// Spreadsheet import (xlsx, xls, xlsb, ods) and result export (xlsx only)
//
// Import: cells are flattened to display strings; formulas contribute their cached value.
// Export: one "Results" sheet with a bold frozen header row and an autofilter.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use hfmatch_recon::model::ResultSet;
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};

use crate::error::IoError;
use crate::export::{export_rows, ExportLabels};
use crate::table::Table;

const RESULTS_SHEET: &str = "Results";
const MIN_WIDTH: f64 = 10.0;
const MAX_WIDTH: f64 = 60.0;

/// Import one worksheet as a table. `sheet` defaults to the first sheet.
pub fn import(path: &Path, sheet: Option<&str>) -> Result<Table, IoError> {
    let mut workbook: Sheets<_> = open_workbook_auto(path).map_err(|e| IoError::Read {
        path: path.to_path_buf(),
        message: format!("failed to open spreadsheet: {}", e),
    })?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let sheet_name = match sheet {
        Some(name) => sheet_names
            .iter()
            .find(|s| s.as_str() == name)
            .cloned()
            .ok_or_else(|| {
                IoError::Sheet(format!(
                    "no sheet named '{}' in {} (available: {})",
                    name,
                    path.display(),
                    sheet_names.join(", ")
                ))
            })?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| IoError::Sheet(format!("{} contains no sheets", path.display())))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IoError::Sheet(format!("failed to read sheet '{}': {}", sheet_name, e)))?;

    let records: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    log::debug!(
        "{}: sheet '{}' of {}, {} raw row(s)",
        path.display(),
        sheet_name,
        sheet_names.len(),
        records.len()
    );

    Ok(Table::from_records(sheet_name, records))
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        // Integral floats print without decimals (facility codes are often numeric)
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => format!("{}", n),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => format!("#{:?}", e),
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Write the result table to a single-sheet workbook.
///
/// Absent values are left as empty cells; the score column is numeric with two decimals.
pub fn write_xlsx(path: &Path, rs: &ResultSet, labels: &ExportLabels) -> Result<(), IoError> {
    let write_err = |e: rust_xlsxwriter::XlsxError| IoError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let rows = export_rows(rs);
    let header_format = Format::new().set_bold();
    let score_format = Format::new().set_num_format("0.00");

    let mut xlsx_workbook = XlsxWorkbook::new();
    let worksheet = xlsx_workbook
        .add_worksheet()
        .set_name(RESULTS_SHEET)
        .map_err(write_err)?;

    let headers = labels.headers();
    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(write_err)?;
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        let status = row.status.to_string();
        let texts = [
            (0u16, row.source_value.as_deref()),
            (1, row.candidate_value.as_deref()),
            (3, Some(status.as_str())),
            (4, row.suggested_value.as_deref()),
        ];
        for (col, text) in texts {
            if let Some(text) = text {
                worksheet.write_string(r, col, text).map_err(write_err)?;
                let w = &mut widths[col as usize];
                *w = (*w).max(text.chars().count());
            }
        }
        worksheet
            .write_number_with_format(r, 2, row.score, &score_format)
            .map_err(write_err)?;
    }

    for (col, w) in widths.iter().enumerate() {
        let width = (*w as f64 + 2.0).clamp(MIN_WIDTH, MAX_WIDTH);
        worksheet
            .set_column_width(col as u16, width)
            .map_err(write_err)?;
    }

    worksheet.set_freeze_panes(1, 0).map_err(write_err)?;
    worksheet
        .autofilter(0, 0, rows.len() as u32, (headers.len() - 1) as u16)
        .map_err(write_err)?;

    xlsx_workbook.save(path).map_err(write_err)?;
    Ok(())
}
