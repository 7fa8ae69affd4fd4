//! `hfmatch match` (ad hoc run from flags) and `hfmatch columns`.

use std::path::{Path, PathBuf};

use hfmatch_cli::workflow::{Side, Workflow};
use hfmatch_io::{compare_columns, load_table, ExportLabels, Table};
use hfmatch_recon::config::ColumnRenames;
use hfmatch_recon::MatchOptions;

use crate::report::{print_summary, to_json, write_output};
use crate::CliError;

pub struct MatchArgs {
    pub reference: PathBuf,
    pub reference_column: String,
    pub reference_sheet: Option<String>,
    pub rename_reference: Vec<(String, String)>,
    pub candidate: PathBuf,
    pub candidate_column: String,
    pub candidate_sheet: Option<String>,
    pub rename_candidate: Vec<(String, String)>,
    pub threshold: f64,
    pub parallel: bool,
    pub output: Option<PathBuf>,
    pub json: bool,
}

/// Parse an `old=new` rename flag.
pub fn parse_rename(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((from, to)) if !from.is_empty() && !to.trim().is_empty() => {
            Ok((from.to_string(), to.to_string()))
        }
        _ => Err(format!("expected OLD=NEW, got \"{s}\"")),
    }
}

fn load(path: &Path, sheet: Option<&str>) -> Result<Table, CliError> {
    load_table(path, sheet).map_err(CliError::input)
}

fn renames(pairs: Vec<(String, String)>) -> ColumnRenames {
    pairs.into_iter().collect()
}

pub fn cmd_match(args: MatchArgs) -> Result<(), CliError> {
    let reference = load(&args.reference, args.reference_sheet.as_deref())?;
    let candidate = load(&args.candidate, args.candidate_sheet.as_deref())?;

    let mut workflow = Workflow::new();
    workflow.load(reference, candidate)?;
    if !args.rename_reference.is_empty() {
        workflow.rename(Side::Reference, &renames(args.rename_reference))?;
    }
    if !args.rename_candidate.is_empty() {
        workflow.rename(Side::Candidate, &renames(args.rename_candidate))?;
    }
    workflow.configure(&args.reference_column, &args.candidate_column, args.threshold)?;
    workflow.run(MatchOptions { parallel: args.parallel })?;

    let (result, stats) = workflow.into_result()?;

    if let Some(ref path) = args.output {
        write_output(path, &result, &ExportLabels::default())?;
    }
    if args.json {
        println!("{}", to_json(&result)?);
    }

    print_summary("match", &result, &stats);
    Ok(())
}

pub fn cmd_columns(reference: PathBuf, candidate: PathBuf, json: bool) -> Result<(), CliError> {
    let reference = load(&reference, None)?;
    let candidate = load(&candidate, None)?;
    let cmp = compare_columns(&reference, &candidate);

    if json {
        let out = serde_json::to_string_pretty(&cmp)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{out}");
        return Ok(());
    }

    let left_title = format!("{} ({} rows)", cmp.reference.name, cmp.reference.row_count);
    let right_title = format!("{} ({} rows)", cmp.candidate.name, cmp.candidate.row_count);
    let width = cmp
        .reference
        .columns
        .iter()
        .map(|c| c.chars().count())
        .chain(std::iter::once(left_title.chars().count()))
        .max()
        .unwrap_or(0)
        + 4;

    println!("{:<width$}{}", left_title, right_title, width = width);
    let rows = cmp.reference.columns.len().max(cmp.candidate.columns.len());
    for i in 0..rows {
        let left = cmp.reference.columns.get(i).map(String::as_str).unwrap_or("");
        let right = cmp.candidate.columns.get(i).map(String::as_str).unwrap_or("");
        println!("{:<width$}{}", left, right, width = width);
    }
    if !cmp.shared.is_empty() {
        println!();
        println!("shared: {}", cmp.shared.join(", "));
    }
    Ok(())
}
