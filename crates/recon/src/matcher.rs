use std::collections::HashSet;

use rayon::prelude::*;

use crate::similarity::score;

/// Outcome of the search for one reference entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Pick<'a> {
    pub source: &'a str,
    pub candidate: Option<&'a str>,
    pub score: f64,
    pub exact: bool,
}

/// Drop repeated values, keeping each first occurrence in input order.
pub fn dedup_preserving_order<S: AsRef<str>>(values: &[S]) -> Vec<&str> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(values.len());
    values
        .iter()
        .map(AsRef::as_ref)
        .filter(|v| seen.insert(*v))
        .collect()
}

/// Highest-scoring candidate for `source`. Ties keep the earliest candidate.
/// `None` only when `candidates` is empty.
pub fn best_match<'a>(source: &str, candidates: &[&'a str]) -> Option<(&'a str, f64)> {
    let mut best: Option<(&'a str, f64)> = None;
    for &candidate in candidates {
        let s = score(source, candidate);
        log::trace!("score {source:?} ~ {candidate:?} = {s:.4}");
        match best {
            Some((_, best_score)) if s <= best_score => {}
            _ => best = Some((candidate, s)),
        }
    }
    best
}

/// Pick a candidate for one reference entry: exact equality first, then best score.
pub fn pick<'a>(source: &'a str, candidates: &[&'a str], exact_set: &HashSet<&str>) -> Pick<'a> {
    if exact_set.contains(source) {
        return Pick {
            source,
            candidate: Some(source),
            score: 100.0,
            exact: true,
        };
    }

    let (candidate, score) = match best_match(source, candidates) {
        Some((c, s)) => (Some(c), s),
        None => (None, 0.0),
    };
    Pick {
        source,
        candidate,
        score,
        exact: false,
    }
}

/// Pick for every reference entry, preserving reference order.
pub fn pick_all<'a>(
    sources: &[&'a str],
    candidates: &[&'a str],
    parallel: bool,
) -> Vec<Pick<'a>> {
    let exact_set: HashSet<&str> = candidates.iter().copied().collect();
    if parallel {
        // Indexed parallel collect keeps input order.
        sources
            .par_iter()
            .map(|&source| pick(source, candidates, &exact_set))
            .collect()
    } else {
        sources
            .iter()
            .map(|&source| pick(source, candidates, &exact_set))
            .collect()
    }
}

/// Candidate values no pick selected, each once, in candidate order.
pub fn collect_orphans<'a>(candidates: &[&'a str], picks: &[Pick<'a>]) -> Vec<&'a str> {
    let mut taken: HashSet<&str> = picks.iter().filter_map(|p| p.candidate).collect();
    let mut orphans = Vec::new();
    for &candidate in candidates {
        // Inserting marks repeats of an orphan value as already emitted.
        if taken.insert(candidate) {
            orphans.push(candidate);
        }
    }
    orphans
}
