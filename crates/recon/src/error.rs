use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconError {
    /// Caller contract violation (threshold out of range, etc.).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),
    /// Config validation error (missing column, bad rename, etc.).
    #[error("config validation error: {0}")]
    ConfigValidation(String),
}

/// Reject thresholds that are not finite or fall outside [0, 100].
pub fn check_threshold(threshold: f64) -> Result<(), ReconError> {
    if !threshold.is_finite() || !(0.0..=100.0).contains(&threshold) {
        return Err(ReconError::InvalidArgument(format!(
            "threshold must be within [0, 100], got {threshold}"
        )));
    }
    Ok(())
}
