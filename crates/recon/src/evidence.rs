use crate::model::{MatchStatus, ResultSet, Statistics};

/// Compute summary statistics from a result set.
pub fn summarize(rs: &ResultSet) -> Statistics {
    let total_records = rs.records.len();
    let total_matches = rs
        .records
        .iter()
        .filter(|r| r.status == MatchStatus::Match)
        .count();

    let match_rate = if total_records == 0 {
        0.0
    } else {
        total_matches as f64 / total_records as f64 * 100.0
    };

    Statistics {
        total_records,
        total_matches,
        total_unmatches: total_records - total_matches,
        match_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MatchRecord, RunMeta};

    fn result(records: Vec<MatchRecord>) -> ResultSet {
        ResultSet {
            meta: RunMeta {
                engine_version: "test".into(),
                run_at: None,
                threshold: 70.0,
                reference_count: 0,
                candidate_count: 0,
            },
            records,
        }
    }

    #[test]
    fn summary_counts() {
        let rs = result(vec![
            MatchRecord::exact("A"),
            MatchRecord::scored("B", Some("B2"), 97.8, 70.0),
            MatchRecord::scored("C", Some("Q"), 12.0, 70.0),
            MatchRecord::orphan("Z"),
        ]);
        let s = summarize(&rs);
        assert_eq!(s.total_records, 4);
        assert_eq!(s.total_matches, 2);
        assert_eq!(s.total_unmatches, 2);
        assert_eq!(s.match_rate, 50.0);
    }

    #[test]
    fn empty_result_has_zero_rate() {
        let s = summarize(&result(vec![]));
        assert_eq!(s.total_records, 0);
        assert_eq!(s.match_rate, 0.0);
    }

    #[test]
    fn single_orphan() {
        let s = summarize(&result(vec![MatchRecord::orphan("Only")]));
        assert_eq!(
            s,
            Statistics {
                total_records: 1,
                total_matches: 0,
                total_unmatches: 1,
                match_rate: 0.0,
            }
        );
    }
}
