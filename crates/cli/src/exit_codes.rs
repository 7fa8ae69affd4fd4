//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain     | Description                              |
//! |---------|------------|------------------------------------------|
//! | 0       | Universal  | Success                                  |
//! | 1       | Universal  | General error (unspecified)              |
//! | 2       | Universal  | CLI usage error (bad args, missing file) |
//! | 60-69   | match      | Job config, input, output failures       |
//!
//! A run that produces unmatched records still exits 0: unmatched rows are
//! a result, not a failure.
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use hfmatch_io::IoError;
use hfmatch_recon::ReconError;

use hfmatch_cli::workflow::WorkflowError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options, unreadable job file.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Match (60-69)
// =============================================================================

/// Job file failed to parse or validate.
pub const EXIT_MATCH_INVALID_CONFIG: u8 = 60;

/// Input table unreadable, unknown sheet, missing column, bad rename.
pub const EXIT_MATCH_INPUT: u8 = 61;

/// Invalid argument to the engine (threshold outside [0, 100]).
pub const EXIT_MATCH_INVALID_ARGUMENT: u8 = 62;

/// Result file could not be written.
pub const EXIT_MATCH_OUTPUT: u8 = 63;

// =============================================================================
// Error Mapping
// =============================================================================

pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::InvalidArgument(_) => EXIT_MATCH_INVALID_ARGUMENT,
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_MATCH_INVALID_CONFIG,
    }
}

/// Write failures are output errors; everything else is on the input side.
pub fn io_exit_code(err: &IoError) -> u8 {
    match err {
        IoError::Write { .. } => EXIT_MATCH_OUTPUT,
        _ => EXIT_MATCH_INPUT,
    }
}

pub fn workflow_exit_code(err: &WorkflowError) -> u8 {
    match err {
        WorkflowError::InvalidTransition { .. } => EXIT_ERROR,
        WorkflowError::Io(e) => io_exit_code(e),
        WorkflowError::Recon(e) => recon_exit_code(e),
    }
}
