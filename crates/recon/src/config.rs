use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;

use crate::error::{check_threshold, ReconError};
use crate::model::MatchOptions;

/// Header renames applied to an input table, old name -> new name.
pub type ColumnRenames = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    #[serde(default = "default_name")]
    pub name: String,
    pub threshold: f64,
    #[serde(default)]
    pub parallel: bool,
    pub reference: SourceConfig,
    pub candidate: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_name() -> String {
    "hfmatch".into()
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// One side of the match: which file, which sheet, which column.
///
/// `column` names the header *after* `rename` has been applied.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub file: String,
    pub column: String,
    #[serde(default)]
    pub sheet: Option<String>,
    #[serde(default)]
    pub rename: ColumnRenames,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub xlsx: Option<String>,
    #[serde(default)]
    pub csv: Option<String>,
    #[serde(default)]
    pub json: Option<String>,
    /// Header for the reference column in exported tables.
    #[serde(default)]
    pub source_label: Option<String>,
    /// Header for the candidate column in exported tables.
    #[serde(default)]
    pub candidate_label: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl JobConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: JobConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        check_threshold(self.threshold)
            .map_err(|_| ReconError::ConfigValidation(format!(
                "threshold must be within [0, 100], got {}",
                self.threshold
            )))?;

        self.reference.validate("reference")?;
        self.candidate.validate("candidate")?;

        Ok(())
    }

    pub fn options(&self) -> MatchOptions {
        MatchOptions {
            parallel: self.parallel,
        }
    }
}

impl SourceConfig {
    fn validate(&self, side: &str) -> Result<(), ReconError> {
        if self.file.trim().is_empty() {
            return Err(ReconError::ConfigValidation(format!("{side}: file is empty")));
        }
        if self.column.trim().is_empty() {
            return Err(ReconError::ConfigValidation(format!("{side}: column is empty")));
        }

        let mut targets = HashSet::new();
        for (from, to) in &self.rename {
            if from.is_empty() || to.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "{side}: rename '{from}' -> '{to}' has an empty name"
                )));
            }
            if !targets.insert(to.as_str()) {
                return Err(ReconError::ConfigValidation(format!(
                    "{side}: more than one column renamed to '{to}'"
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
