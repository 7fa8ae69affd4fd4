//! Match workflow: load two tables, optionally rename headers, pick a column
//! from each plus a threshold, run, and read the result.
//!
//! ```text
//! AwaitingInput --load--> AwaitingConfig --configure--> Ready --run--> Completed
//!                          ^   |rename                                     |
//!                          +---+                    reset (from any state) v
//!                                                                  AwaitingInput
//! ```

use hfmatch_io::{IoError, Table};
use hfmatch_recon::config::ColumnRenames;
use hfmatch_recon::error::check_threshold;
use hfmatch_recon::{match_lists_with, MatchOptions, ReconError, ResultSet, Statistics};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Reference,
    Candidate,
}

/// Columns chosen for a run, with their values already extracted.
#[derive(Debug, Clone)]
pub struct Selection {
    pub reference_column: String,
    pub candidate_column: String,
    pub reference_values: Vec<String>,
    pub candidate_values: Vec<String>,
    pub threshold: f64,
}

#[derive(Debug, Default)]
pub enum Workflow {
    #[default]
    AwaitingInput,
    AwaitingConfig {
        reference: Table,
        candidate: Table,
    },
    Ready {
        reference: Table,
        candidate: Table,
        selection: Selection,
    },
    Completed {
        reference: Table,
        candidate: Table,
        selection: Selection,
        result: ResultSet,
        statistics: Statistics,
    },
}

#[derive(Debug)]
pub enum WorkflowError {
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
    Io(IoError),
    Recon(ReconError),
}

impl std::fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowError::InvalidTransition { from, action } => {
                write!(f, "cannot {} while {}", action, from)
            }
            WorkflowError::Io(e) => write!(f, "{}", e),
            WorkflowError::Recon(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for WorkflowError {}

impl From<IoError> for WorkflowError {
    fn from(e: IoError) -> Self {
        WorkflowError::Io(e)
    }
}

impl From<ReconError> for WorkflowError {
    fn from(e: ReconError) -> Self {
        WorkflowError::Recon(e)
    }
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state_name(&self) -> &'static str {
        match self {
            Workflow::AwaitingInput => "AwaitingInput",
            Workflow::AwaitingConfig { .. } => "AwaitingConfig",
            Workflow::Ready { .. } => "Ready",
            Workflow::Completed { .. } => "Completed",
        }
    }

    fn invalid(&self, action: &'static str) -> WorkflowError {
        WorkflowError::InvalidTransition {
            from: self.state_name(),
            action,
        }
    }

    pub fn load(&mut self, reference: Table, candidate: Table) -> Result<(), WorkflowError> {
        if !matches!(self, Workflow::AwaitingInput) {
            return Err(self.invalid("load"));
        }
        log::debug!(
            "workflow: loaded '{}' ({} rows) and '{}' ({} rows)",
            reference.name,
            reference.row_count(),
            candidate.name,
            candidate.row_count()
        );
        *self = Workflow::AwaitingConfig { reference, candidate };
        Ok(())
    }

    pub fn rename(&mut self, side: Side, renames: &ColumnRenames) -> Result<(), WorkflowError> {
        match self {
            Workflow::AwaitingConfig { reference, candidate } => {
                let table = match side {
                    Side::Reference => reference,
                    Side::Candidate => candidate,
                };
                table.rename(renames)?;
                Ok(())
            }
            _ => Err(self.invalid("rename")),
        }
    }

    pub fn configure(
        &mut self,
        reference_column: &str,
        candidate_column: &str,
        threshold: f64,
    ) -> Result<(), WorkflowError> {
        let Workflow::AwaitingConfig { reference, candidate } = &*self else {
            return Err(self.invalid("configure"));
        };

        check_threshold(threshold)?;
        let selection = Selection {
            reference_column: reference_column.to_string(),
            candidate_column: candidate_column.to_string(),
            reference_values: reference.column_values(reference_column)?,
            candidate_values: candidate.column_values(candidate_column)?,
            threshold,
        };

        if let Workflow::AwaitingConfig { reference, candidate } = std::mem::take(self) {
            *self = Workflow::Ready { reference, candidate, selection };
        }
        Ok(())
    }

    pub fn run(&mut self, options: MatchOptions) -> Result<(), WorkflowError> {
        let Workflow::Ready { selection, .. } = &*self else {
            return Err(self.invalid("run"));
        };

        let mut result = match_lists_with(
            &selection.reference_values,
            &selection.candidate_values,
            selection.threshold,
            options,
        )?;
        result.meta.stamp(chrono::Utc::now());
        let statistics = result.statistics();

        if let Workflow::Ready { reference, candidate, selection } = std::mem::take(self) {
            *self = Workflow::Completed {
                reference,
                candidate,
                selection,
                result,
                statistics,
            };
        }
        Ok(())
    }

    /// Start over from any state.
    pub fn reset(&mut self) {
        *self = Workflow::AwaitingInput;
    }

    pub fn result(&self) -> Option<&ResultSet> {
        match self {
            Workflow::Completed { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn statistics(&self) -> Option<&Statistics> {
        match self {
            Workflow::Completed { statistics, .. } => Some(statistics),
            _ => None,
        }
    }

    pub fn selection(&self) -> Option<&Selection> {
        match self {
            Workflow::Ready { selection, .. } | Workflow::Completed { selection, .. } => Some(selection),
            _ => None,
        }
    }

    /// Consume a completed workflow, yielding its result and statistics.
    pub fn into_result(self) -> Result<(ResultSet, Statistics), WorkflowError> {
        match self {
            Workflow::Completed { result, statistics, .. } => Ok((result, statistics)),
            other => Err(other.invalid("take result")),
        }
    }
}
