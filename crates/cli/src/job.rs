//! `hfmatch run` and `hfmatch validate`: job-file driven matching.

use std::path::{Path, PathBuf};

use hfmatch_cli::workflow::{Side, Workflow};
use hfmatch_io::{load_table, ExportLabels};
use hfmatch_recon::JobConfig;

use crate::report::{print_summary, to_json, write_output};
use crate::CliError;

fn load_job(path: &Path) -> Result<JobConfig, CliError> {
    let config_str = std::fs::read_to_string(path).map_err(|e| {
        CliError::usage(format!("cannot read job file {}: {e}", path.display()))
    })?;
    JobConfig::from_toml(&config_str).map_err(CliError::from)
}

/// Input and output paths in a job file are relative to the job file.
fn base_dir(job_path: &Path) -> &Path {
    match job_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

pub fn cmd_run(job_path: PathBuf, json_output: bool, output_file: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_job(&job_path)?;
    let base = base_dir(&job_path);
    log::debug!("job '{}' from {}", config.name, job_path.display());

    let reference = load_table(&base.join(&config.reference.file), config.reference.sheet.as_deref())
        .map_err(CliError::input)?;
    let candidate = load_table(&base.join(&config.candidate.file), config.candidate.sheet.as_deref())
        .map_err(CliError::input)?;

    let mut workflow = Workflow::new();
    workflow.load(reference, candidate)?;
    if !config.reference.rename.is_empty() {
        workflow.rename(Side::Reference, &config.reference.rename)?;
    }
    if !config.candidate.rename.is_empty() {
        workflow.rename(Side::Candidate, &config.candidate.rename)?;
    }
    workflow.configure(&config.reference.column, &config.candidate.column, config.threshold)?;
    workflow.run(config.options())?;

    let (result, stats) = workflow.into_result()?;

    let labels = ExportLabels::from_output(&config.output);
    let outputs = [&config.output.xlsx, &config.output.csv, &config.output.json];
    for path in outputs.into_iter().flatten() {
        write_output(&base.join(path), &result, &labels)?;
    }
    if let Some(ref path) = output_file {
        write_output(path, &result, &labels)?;
    }

    if json_output {
        println!("{}", to_json(&result)?);
    }

    print_summary(&config.name, &result, &stats);
    Ok(())
}

pub fn cmd_validate(job_path: PathBuf) -> Result<(), CliError> {
    let config = load_job(&job_path)?;
    let outputs = [&config.output.xlsx, &config.output.csv, &config.output.json]
        .into_iter()
        .flatten()
        .count();
    eprintln!(
        "{}: valid ({} vs {}, threshold {}, {} output file(s))",
        config.name, config.reference.file, config.candidate.file, config.threshold, outputs,
    );
    Ok(())
}
