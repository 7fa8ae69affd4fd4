//! Jaro-Winkler string similarity.
//!
//! Case-sensitive and normalization-free: `"Clinic"` and `"clinic"` are
//! different strings here. Callers that want case-insensitive matching must
//! fold case before calling in.

/// Jaro similarity in [0, 1].
///
/// Two empty strings are identical (1.0); an empty string against a
/// non-empty one scores 0.0.
pub fn jaro(s1: &str, s2: &str) -> f64 {
    let (a, b) = canonical_order(s1, s2);
    strsim::jaro(a, b)
}

/// Jaro-Winkler similarity in [0, 1]: prefix bonus of 0.1 per shared leading
/// char (up to 4) once the Jaro score exceeds 0.7.
pub fn jaro_winkler(s1: &str, s2: &str) -> f64 {
    let (a, b) = canonical_order(s1, s2);
    strsim::jaro_winkler(a, b)
}

/// Jaro-Winkler similarity scaled to [0, 100].
pub fn score(s1: &str, s2: &str) -> f64 {
    jaro_winkler(s1, s2) * 100.0
}

/// Fix argument order so the float arithmetic is identical for (a, b) and (b, a).
fn canonical_order<'a>(s1: &'a str, s2: &'a str) -> (&'a str, &'a str) {
    if s1 <= s2 {
        (s1, s2)
    } else {
        (s2, s1)
    }
}
