use crate::error::{check_threshold, ReconError};
use crate::matcher::{collect_orphans, dedup_preserving_order, pick_all};
use crate::model::{MatchOptions, MatchRecord, ResultSet, RunMeta};

/// Align `reference` against `candidates` with default options.
pub fn match_lists<S, T>(reference: &[S], candidates: &[T], threshold: f64) -> Result<ResultSet, ReconError>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    match_lists_with(reference, candidates, threshold, MatchOptions::default())
}

/// Align `reference` against `candidates`.
///
/// Output order: one record per de-duplicated reference entry (reference
/// order), then one orphan per candidate value that no reference entry
/// picked (candidate order).
pub fn match_lists_with<S, T>(
    reference: &[S],
    candidates: &[T],
    threshold: f64,
    options: MatchOptions,
) -> Result<ResultSet, ReconError>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    check_threshold(threshold)?;

    let sources = dedup_preserving_order(reference);
    let candidates: Vec<&str> = candidates.iter().map(AsRef::as_ref).collect();

    log::debug!(
        "matching {} reference entries ({} before dedup) against {} candidates, threshold {threshold}, parallel={}",
        sources.len(),
        reference.len(),
        candidates.len(),
        options.parallel,
    );

    let picks = pick_all(&sources, &candidates, options.parallel);
    let orphans = collect_orphans(&candidates, &picks);

    let mut records = Vec::with_capacity(picks.len() + orphans.len());
    for p in &picks {
        if p.exact {
            records.push(MatchRecord::exact(p.source));
        } else {
            records.push(MatchRecord::scored(p.source, p.candidate, p.score, threshold));
        }
    }
    records.extend(orphans.iter().map(|c| MatchRecord::orphan(c)));

    log::debug!(
        "{} records ({} exact, {} orphans)",
        records.len(),
        picks.iter().filter(|p| p.exact).count(),
        orphans.len(),
    );

    Ok(ResultSet {
        meta: RunMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: None,
            threshold,
            reference_count: sources.len(),
            candidate_count: candidates.len(),
        },
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MatchStatus;

    #[test]
    fn health_post_scenario() {
        let a = ["Health Post A", "Clinic B"];
        let b = ["Health Post A", "Clinic B2"];
        let rs = match_lists(&a, &b, 70.0).unwrap();

        assert_eq!(rs.len(), 2);
        assert_eq!(rs.records[0], MatchRecord::exact("Health Post A"));

        let r = &rs.records[1];
        assert_eq!(r.source_value.as_deref(), Some("Clinic B"));
        assert_eq!(r.candidate_value.as_deref(), Some("Clinic B2"));
        assert!((r.score - 97.78).abs() < 0.01, "score {}", r.score);
        assert_eq!(r.status, MatchStatus::Match);
        assert_eq!(rs.orphans().count(), 0);
    }

    #[test]
    fn tie_at_zero_selects_first_and_orphans_rest() {
        let rs = match_lists(&["X"], &["Y", "Z"], 50.0).unwrap();
        assert_eq!(rs.len(), 2);
        assert_eq!(rs.records[0].candidate_value.as_deref(), Some("Y"));
        assert_eq!(rs.records[0].score, 0.0);
        assert_eq!(rs.records[0].status, MatchStatus::Unmatch);
        assert_eq!(rs.records[1], MatchRecord::orphan("Z"));
    }

    #[test]
    fn empty_reference_yields_only_orphans() {
        let empty: [&str; 0] = [];
        let rs = match_lists(&empty, &["Only"], 50.0).unwrap();
        assert_eq!(rs.records, vec![MatchRecord::orphan("Only")]);
    }

    #[test]
    fn empty_candidates_leave_candidate_absent() {
        let empty: [&str; 0] = [];
        let rs = match_lists(&["A"], &empty, 0.0).unwrap();
        assert_eq!(rs.len(), 1);
        assert_eq!(rs.records[0].candidate_value, None);
        assert_eq!(rs.records[0].score, 0.0);
        // 0 >= 0: classification is purely score-vs-threshold.
        assert_eq!(rs.records[0].status, MatchStatus::Match);
    }

    #[test]
    fn threshold_out_of_range_fails() {
        let err = match_lists(&["A"], &["A"], 150.0).unwrap_err();
        assert!(matches!(err, ReconError::InvalidArgument(_)));
        assert!(match_lists(&["A"], &["A"], -1.0).is_err());
    }

    #[test]
    fn exact_match_wins_at_max_threshold() {
        let rs = match_lists(&["Bo CHC"], &["Bo CHC 2", "Bo CHC"], 100.0).unwrap();
        assert_eq!(rs.records[0], MatchRecord::exact("Bo CHC"));
        assert_eq!(rs.orphans().count(), 1);
        assert_eq!(rs.records[1].candidate_value.as_deref(), Some("Bo CHC 2"));
    }

    #[test]
    fn reference_is_deduplicated_candidates_are_not() {
        let rs = match_lists(&["A", "A", "B"], &["A", "A", "Q"], 90.0).unwrap();
        assert_eq!(rs.meta.reference_count, 2);
        assert_eq!(rs.meta.candidate_count, 3);
        assert_eq!(rs.records[0], MatchRecord::exact("A"));
        assert_eq!(rs.records[1].source_value.as_deref(), Some("B"));
    }

    #[test]
    fn below_threshold_best_match_is_not_orphaned() {
        let rs = match_lists(&["Makeni"], &["Magburaka", "Kabala"], 99.0).unwrap();
        let first = &rs.records[0];
        assert_eq!(first.status, MatchStatus::Unmatch);
        let chosen = first.candidate_value.clone().unwrap();
        assert!(rs.orphans().all(|o| o.candidate_value.as_deref() != Some(chosen.as_str())));
        assert_eq!(rs.len(), 2);
    }

    #[test]
    fn identical_inputs_give_identical_results() {
        let a = ["Kenema Govt Hospital", "Kabala CHP"];
        let b = ["Kenema Government Hospital", "Port Loko CHC"];
        let first = match_lists(&a, &b, 70.0).unwrap();
        let second = match_lists(&a, &b, 70.0).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.meta.run_at, None);
    }

    #[test]
    fn accepts_owned_strings() {
        let a = vec![String::from("Lungi")];
        let b = vec![String::from("Lungi")];
        let rs = match_lists(&a, &b, 70.0).unwrap();
        assert_eq!(rs.records[0].score, 100.0);
    }
}
