use chrono::{DateTime, Utc};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct MatchOptions {
    /// Search best matches for reference entries on the rayon pool.
    pub parallel: bool,
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchStatus {
    Match,
    Unmatch,
}

impl MatchStatus {
    pub fn classify(score: f64, threshold: f64) -> Self {
        if score >= threshold {
            Self::Match
        } else {
            Self::Unmatch
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => write!(f, "Match"),
            Self::Unmatch => write!(f, "Unmatch"),
        }
    }
}

/// One row of the result table.
///
/// `source_value` is `None` only for orphans (candidate values nobody picked).
/// `candidate_value` is `None` only when the candidate list was empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub source_value: Option<String>,
    pub candidate_value: Option<String>,
    pub score: f64,
    pub status: MatchStatus,
}

impl MatchRecord {
    pub fn exact(value: &str) -> Self {
        Self {
            source_value: Some(value.to_string()),
            candidate_value: Some(value.to_string()),
            score: 100.0,
            status: MatchStatus::Match,
        }
    }

    pub fn scored(source: &str, candidate: Option<&str>, score: f64, threshold: f64) -> Self {
        Self {
            source_value: Some(source.to_string()),
            candidate_value: candidate.map(str::to_string),
            score,
            status: MatchStatus::classify(score, threshold),
        }
    }

    pub fn orphan(candidate: &str) -> Self {
        Self {
            source_value: None,
            candidate_value: Some(candidate.to_string()),
            score: 0.0,
            status: MatchStatus::Unmatch,
        }
    }

    pub fn is_orphan(&self) -> bool {
        self.source_value.is_none()
    }

    pub fn is_match(&self) -> bool {
        self.status == MatchStatus::Match
    }

    /// Name to carry forward: the candidate when matched, else the source.
    pub fn suggested_value(&self) -> Option<&str> {
        match self.status {
            MatchStatus::Match => self.candidate_value.as_deref(),
            MatchStatus::Unmatch => self.source_value.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Result + summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunMeta {
    pub engine_version: String,
    /// RFC 3339 time of the run, set by the host via [`RunMeta::stamp`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_at: Option<String>,
    pub threshold: f64,
    /// Reference entries after de-duplication.
    pub reference_count: usize,
    pub candidate_count: usize,
}

impl RunMeta {
    pub fn stamp(&mut self, at: DateTime<Utc>) {
        self.run_at = Some(at.to_rfc3339());
    }
}

/// Ordered result: one record per de-duplicated reference entry, then orphans.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSet {
    pub meta: RunMeta,
    pub records: Vec<MatchRecord>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchRecord> {
        self.records.iter()
    }

    pub fn orphans(&self) -> impl Iterator<Item = &MatchRecord> {
        self.records.iter().filter(|r| r.is_orphan())
    }

    pub fn statistics(&self) -> Statistics {
        crate::evidence::summarize(self)
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a MatchRecord;
    type IntoIter = std::slice::Iter<'a, MatchRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total_records: usize,
    pub total_matches: usize,
    pub total_unmatches: usize,
    /// Percentage in [0, 100]; 0 for an empty result.
    pub match_rate: f64,
}
