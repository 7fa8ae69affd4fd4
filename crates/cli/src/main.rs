// hfmatch CLI - reconcile two lists of facility names

mod exit_codes;
mod job;
mod matching;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use hfmatch_cli::workflow::WorkflowError;
use hfmatch_io::IoError;
use hfmatch_recon::ReconError;

use exit_codes::{
    io_exit_code, recon_exit_code, workflow_exit_code, EXIT_ERROR, EXIT_MATCH_OUTPUT,
    EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "hfmatch")]
#[command(about = "Align two lists of names by Jaro-Winkler similarity")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Log run details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a match job from a TOML file
    #[command(after_help = "\
Examples:
  hfmatch run mfl-vs-dhis2.match.toml
  hfmatch run mfl-vs-dhis2.match.toml --json
  hfmatch run mfl-vs-dhis2.match.toml --output extra.csv")]
    Run {
        /// Path to the .match.toml job file
        job: PathBuf,

        /// Print the result document (meta, statistics, records) to stdout
        #[arg(long)]
        json: bool,

        /// Also write results to this file (.xlsx, .csv or .json)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Match one column of a reference file against one column of a candidate file
    #[command(after_help = "\
Examples:
  hfmatch match --reference mfl.xlsx --reference-column 'HF Name' \\
                --candidate dhis2.csv --candidate-column orgunit --output results.xlsx
  hfmatch match --reference a.csv --reference-column name --candidate b.csv \\
                --candidate-column name --threshold 85 --json")]
    Match {
        /// Reference list file (csv, tsv, txt, xlsx, xls, xlsb, ods)
        #[arg(long)]
        reference: PathBuf,

        /// Column to read from the reference file (after renames)
        #[arg(long)]
        reference_column: String,

        /// Worksheet in the reference file (default: first sheet)
        #[arg(long)]
        reference_sheet: Option<String>,

        /// Rename a reference header, OLD=NEW (repeatable)
        #[arg(long, value_parser = matching::parse_rename)]
        rename_reference: Vec<(String, String)>,

        /// Candidate list file
        #[arg(long)]
        candidate: PathBuf,

        /// Column to read from the candidate file (after renames)
        #[arg(long)]
        candidate_column: String,

        /// Worksheet in the candidate file (default: first sheet)
        #[arg(long)]
        candidate_sheet: Option<String>,

        /// Rename a candidate header, OLD=NEW (repeatable)
        #[arg(long, value_parser = matching::parse_rename)]
        rename_candidate: Vec<(String, String)>,

        /// Minimum score (0-100) for a Match
        #[arg(long, default_value_t = 70.0)]
        threshold: f64,

        /// Search best matches on all cores
        #[arg(long)]
        parallel: bool,

        /// Write results to this file (.xlsx, .csv or .json)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the result document to stdout
        #[arg(long)]
        json: bool,
    },

    /// Show the columns of two files side by side
    #[command(after_help = "\
Examples:
  hfmatch columns mfl.xlsx dhis2.csv
  hfmatch columns mfl.xlsx dhis2.csv --json")]
    Columns {
        reference: PathBuf,
        candidate: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Parse and validate a job file without running it
    Validate {
        job: PathBuf,
    },
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run { job, json, output } => job::cmd_run(job, json, output),
        Commands::Validate { job } => job::cmd_validate(job),
        Commands::Match {
            reference,
            reference_column,
            reference_sheet,
            rename_reference,
            candidate,
            candidate_column,
            candidate_sheet,
            rename_candidate,
            threshold,
            parallel,
            output,
            json,
        } => matching::cmd_match(matching::MatchArgs {
            reference,
            reference_column,
            reference_sheet,
            rename_reference,
            candidate,
            candidate_column,
            candidate_sheet,
            rename_candidate,
            threshold,
            parallel,
            output,
            json,
        }),
        Commands::Columns { reference, candidate, json } => {
            matching::cmd_columns(reference, candidate, json)
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn output(msg: impl Into<String>) -> Self {
        Self { code: EXIT_MATCH_OUTPUT, message: msg.into(), hint: None }
    }

    /// Input table errors, with a pointer to `hfmatch columns` for header problems.
    pub fn input(err: IoError) -> Self {
        let hint = match &err {
            IoError::MissingColumn { .. } | IoError::Rename(_) => {
                Some("`hfmatch columns <reference> <candidate>` lists the headers of both files".to_string())
            }
            IoError::UnsupportedFormat(_) => {
                Some("inputs must be csv, tsv, txt, xlsx, xlsm, xls, xlsb or ods".to_string())
            }
            _ => None,
        };
        Self { code: io_exit_code(&err), message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<ReconError> for CliError {
    fn from(err: ReconError) -> Self {
        let code = recon_exit_code(&err);
        Self { code, message: err.to_string(), hint: None }
    }
}

impl From<WorkflowError> for CliError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Io(e) => CliError::input(e),
            other => Self { code: workflow_exit_code(&other), message: other.to_string(), hint: None },
        }
    }
}
