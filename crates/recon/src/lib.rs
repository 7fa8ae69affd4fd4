//! `hfmatch-recon`: two-list approximate name reconciliation engine.
//!
//! Pure engine crate: receives two ordered lists of labels, returns an aligned,
//! classified result table. No CLI or IO dependencies.
//!
//! Every reference entry is compared against every candidate entry, so a run
//! costs |reference| × |candidate| similarity evaluations. Lists in the low
//! thousands finish in well under a second; beyond ~10k entries per side,
//! trim or pre-group the inputs before calling [`match_lists`].

pub mod config;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod matcher;
pub mod model;
pub mod similarity;

pub use config::JobConfig;
pub use engine::{match_lists, match_lists_with};
pub use error::ReconError;
pub use evidence::summarize;
pub use model::{MatchOptions, MatchRecord, MatchStatus, ResultSet, RunMeta, Statistics};
pub use similarity::{jaro, jaro_winkler, score};
