// JSON export: run metadata, statistics and records in one document

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use hfmatch_recon::model::{ResultSet, RunMeta, Statistics};
use serde::Serialize;

use crate::error::IoError;
use crate::export::{export_rows, ExportRow};

#[derive(Debug, Serialize)]
pub struct ResultDocument<'a> {
    pub meta: &'a RunMeta,
    pub statistics: Statistics,
    pub records: Vec<ExportRow>,
}

impl<'a> ResultDocument<'a> {
    pub fn new(rs: &'a ResultSet) -> Self {
        Self {
            meta: &rs.meta,
            statistics: rs.statistics(),
            records: export_rows(rs),
        }
    }
}

pub fn write_json(path: &Path, rs: &ResultSet) -> Result<(), IoError> {
    let file = File::create(path).map_err(|e| IoError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &ResultDocument::new(rs))?;
    Ok(())
}
