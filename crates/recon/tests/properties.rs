// Property-based tests for the similarity metric and the matching engine.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::HashSet;

use proptest::prelude::*;
use hfmatch_recon::engine::{match_lists, match_lists_with};
use hfmatch_recon::model::{MatchOptions, MatchStatus};
use hfmatch_recon::similarity::jaro_winkler;
use hfmatch_recon::summarize;

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Facility-like label: small alphabet so collisions and near-misses are common.
fn arb_label() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => r"[A-Ca-c ]{0,8}",
        1 => r"[A-Za-zé0-9 .-]{1,16}",
    ]
}

fn arb_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_label(), 0..12)
}

fn arb_threshold() -> impl Strategy<Value = f64> {
    prop_oneof![
        1 => Just(0.0),
        1 => Just(100.0),
        4 => 0.0..=100.0f64,
    ]
}

// ---------------------------------------------------------------------------
// Similarity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    #[test]
    fn similarity_is_symmetric(a in arb_label(), b in arb_label()) {
        prop_assert_eq!(jaro_winkler(&a, &b), jaro_winkler(&b, &a));
    }

    #[test]
    fn similarity_is_bounded(a in arb_label(), b in arb_label()) {
        let s = jaro_winkler(&a, &b);
        prop_assert!((0.0..=1.0).contains(&s), "{} out of range", s);
    }

    #[test]
    fn similarity_identity(a in r"[A-Za-z ]{1,16}") {
        prop_assert_eq!(jaro_winkler(&a, &a), 1.0);
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    #[test]
    fn result_is_complete(a in arb_list(), b in arb_list(), t in arb_threshold()) {
        let rs = match_lists(&a, &b, t).unwrap();

        let distinct_a: HashSet<&str> = a.iter().map(String::as_str).collect();
        let selected: HashSet<&str> = rs
            .iter()
            .filter(|r| !r.is_orphan())
            .filter_map(|r| r.candidate_value.as_deref())
            .collect();
        let unselected_b: HashSet<&str> = b
            .iter()
            .map(String::as_str)
            .filter(|v| !selected.contains(v))
            .collect();

        prop_assert_eq!(rs.len(), distinct_a.len() + unselected_b.len());
        prop_assert_eq!(rs.orphans().count(), unselected_b.len());
    }

    #[test]
    fn records_respect_invariants(a in arb_list(), b in arb_list(), t in arb_threshold()) {
        let rs = match_lists(&a, &b, t).unwrap();
        let b_set: HashSet<&str> = b.iter().map(String::as_str).collect();

        for r in &rs {
            prop_assert!((0.0..=100.0).contains(&r.score));
            if r.is_orphan() {
                prop_assert_eq!(r.score, 0.0);
                prop_assert_eq!(r.status, MatchStatus::Unmatch);
                prop_assert!(r.candidate_value.is_some());
                continue;
            }

            let source = r.source_value.as_deref().unwrap();
            if b_set.contains(source) {
                prop_assert_eq!(r.candidate_value.as_deref(), Some(source));
                prop_assert_eq!(r.score, 100.0);
                prop_assert_eq!(r.status, MatchStatus::Match);
            } else {
                prop_assert_eq!(r.status == MatchStatus::Match, r.score >= t);
            }
            prop_assert_eq!(r.candidate_value.is_some(), !b.is_empty());
        }
    }

    #[test]
    fn orphans_follow_reference_block_in_candidate_order(a in arb_list(), b in arb_list()) {
        let rs = match_lists(&a, &b, 70.0).unwrap();
        let first_orphan = rs.iter().position(|r| r.is_orphan()).unwrap_or(rs.len());
        prop_assert!(rs.records[first_orphan..].iter().all(|r| r.is_orphan()));

        let positions: Vec<usize> = rs.records[first_orphan..]
            .iter()
            .map(|r| {
                let v = r.candidate_value.as_deref().unwrap();
                b.iter().position(|x| x == v).unwrap()
            })
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn statistics_consistent(a in arb_list(), b in arb_list(), t in arb_threshold()) {
        let rs = match_lists(&a, &b, t).unwrap();
        let s = summarize(&rs);
        prop_assert_eq!(s.total_matches + s.total_unmatches, s.total_records);
        if s.total_records == 0 {
            prop_assert_eq!(s.match_rate, 0.0);
        } else {
            prop_assert!((0.0..=100.0).contains(&s.match_rate));
        }
    }

    #[test]
    fn deterministic_across_modes(a in arb_list(), b in arb_list(), t in arb_threshold()) {
        let seq = match_lists_with(&a, &b, t, MatchOptions { parallel: false }).unwrap();
        let again = match_lists_with(&a, &b, t, MatchOptions { parallel: false }).unwrap();
        let par = match_lists_with(&a, &b, t, MatchOptions { parallel: true }).unwrap();
        prop_assert_eq!(&seq.records, &again.records);
        prop_assert_eq!(&seq.records, &par.records);
    }

    #[test]
    fn out_of_range_threshold_rejected(t in prop_oneof![-1000.0..-0.001f64, 100.001..1000.0f64]) {
        prop_assert!(match_lists(&["A"], &["A"], t).is_err());
    }
}
