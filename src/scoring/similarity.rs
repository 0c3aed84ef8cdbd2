//! Set-similarity and association-strength primitives.
//!
//! Two building blocks used across the scoring pipeline:
//! - Dunning log-likelihood: how strongly an observation is associated with
//!   one of two groups
//! - weighted Jaccard: set overlap where shared elements contribute a
//!   configurable weight, optionally capped to the strongest contributors

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Dunning log-likelihood of an observation in two groups.
///
/// Determines whether an observation is more strongly associated with one
/// of two groups, and the strength of that association.
///
/// # Arguments
/// * `f1` - observation frequency in group one
/// * `s1` - total data points in group one
/// * `f2` - observation frequency in group two
/// * `s2` - total data points in group two
///
/// # Returns
/// Positive when the observation is more likely in group one, negative when
/// more likely in group two; more extreme values indicate a stronger
/// association. Degenerate inputs (`f1 + f2 == 0`, or an empty group) give 0.
pub fn dunning_log_likelihood(f1: u64, s1: u64, f2: u64, s2: u64) -> f64 {
    if f1 + f2 == 0 {
        return 0.0;
    }
    if s1 == 0 || s2 == 0 {
        return 0.0;
    }
    let (f1, s1, f2, s2) = (f1 as f64, s1 as f64, f2 as f64, s2 as f64);

    // Expected frequencies if the groups shared one underlying rate.
    let e1 = s1 * (f1 + f2) / (s1 + s2);
    let e2 = s2 * (f1 + f2) / (s1 + s2);

    let mut l1 = 0.0;
    let mut l2 = 0.0;
    if e1 != 0.0 && f1 != 0.0 {
        l1 = f1 * (f1 / e1).ln();
    }
    if e2 != 0.0 && f2 != 0.0 {
        l2 = f2 * (f2 / e2).ln();
    }

    let likelihood = 2.0 * (l1 + l2);
    // The magnitude is always non-negative; the sign encodes direction.
    if f2 / s2 > f1 / s1 {
        -likelihood
    } else {
        likelihood
    }
}

/// Weighted Jaccard similarity, a measure of set overlap.
///
/// Each shared element contributes `max(weight, 1)` instead of a unit
/// count; weights below 1 are clamped so intersection membership never
/// counts less than an unweighted match. With `max_intersections` set, only
/// the strongest that-many contributions are counted, and the union size is
/// discounted by the number of intersections actually counted.
///
/// # Arguments
/// * `a`, `b` - the sets to compare
/// * `weights` - optional element weights; missing entries default to 1
/// * `max_intersections` - optional cap on counted intersections
///
/// # Returns
/// 0 (no overlap) through 1 (complete overlap). Two empty sets give 0.
pub fn weighted_jaccard<T>(
    a: &HashSet<T>,
    b: &HashSet<T>,
    weights: Option<&HashMap<T, f64>>,
    max_intersections: Option<usize>,
) -> f64
where
    T: Eq + Hash,
{
    let mut contributions: Vec<f64> = a
        .intersection(b)
        .map(|element| {
            weights
                .and_then(|w| w.get(element))
                .copied()
                .unwrap_or(1.0)
                .max(1.0)
        })
        .collect();
    contributions.sort_by(|x, y| y.total_cmp(x));
    if let Some(cap) = max_intersections {
        contributions.truncate(cap);
    }

    let counted = contributions.len();
    let intersection: f64 = contributions.iter().sum();
    let union = intersection + (a.union(b).count() - counted) as f64;
    if union == 0.0 {
        return 0.0;
    }
    intersection / union
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(elements: &[&'static str]) -> HashSet<&'static str> {
        elements.iter().copied().collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 5e-3,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_log_likelihood_happy() {
        assert_close(dunning_log_likelihood(2, 10, 1, 10), 0.34);
        assert_close(dunning_log_likelihood(5, 10, 1, 10), 2.91);
        assert_close(dunning_log_likelihood(1, 10, 5, 10), -2.91);
    }

    #[test]
    fn test_log_likelihood_equal_ratios() {
        assert_eq!(dunning_log_likelihood(1, 10, 1, 10), 0.0);
        assert_eq!(dunning_log_likelihood(1, 10, 10, 100), 0.0);
    }

    #[test]
    fn test_log_likelihood_zero_args() {
        assert_close(dunning_log_likelihood(10, 10, 0, 10), 13.86);
        assert_eq!(dunning_log_likelihood(0, 10, 0, 10), 0.0);
        assert_eq!(dunning_log_likelihood(0, 10, 0, 0), 0.0);
        assert_eq!(dunning_log_likelihood(0, 0, 0, 0), 0.0);
    }

    #[test]
    fn test_log_likelihood_antisymmetric() {
        let forward = dunning_log_likelihood(3, 12, 7, 25);
        let backward = dunning_log_likelihood(7, 25, 3, 12);
        assert_close(forward, -backward);
    }

    #[test]
    fn test_jaccard_happy() {
        assert_eq!(weighted_jaccard(&set(&["a", "b", "c"]), &set(&["c", "d"]), None, None), 0.25);
        assert_eq!(
            weighted_jaccard(&set(&["a", "b", "c"]), &set(&["b", "c", "d"]), None, None),
            0.5
        );
        assert_eq!(
            weighted_jaccard(&set(&["a", "b", "c", "d"]), &set(&["c", "d"]), None, None),
            0.5
        );
    }

    #[test]
    fn test_jaccard_full_overlap() {
        assert_eq!(weighted_jaccard(&set(&["a", "b"]), &set(&["a", "b"]), None, None), 1.0);
    }

    #[test]
    fn test_jaccard_no_overlap() {
        assert_eq!(weighted_jaccard(&set(&["a", "b"]), &set(&["x", "y"]), None, None), 0.0);
        assert_eq!(weighted_jaccard(&set(&["a", "b"]), &set(&[]), None, None), 0.0);
        assert_eq!(weighted_jaccard(&set(&[]), &set(&[]), None, None), 0.0);
    }

    #[test]
    fn test_jaccard_symmetric() {
        let a = set(&["a", "b", "c"]);
        let b = set(&["c", "d"]);
        let weights: HashMap<&str, f64> = [("c", 5.0)].into_iter().collect();
        assert_eq!(
            weighted_jaccard(&a, &b, Some(&weights), None),
            weighted_jaccard(&b, &a, Some(&weights), None)
        );
    }

    #[test]
    fn test_weighted_jaccard() {
        let unit: HashMap<&str, f64> = [("a", 1.0), ("b", 1.0), ("c", 1.0), ("d", 1.0)]
            .into_iter()
            .collect();
        assert_eq!(
            weighted_jaccard(&set(&["a", "b", "c"]), &set(&["c", "d"]), Some(&unit), None),
            0.25
        );

        let boosted: HashMap<&str, f64> = [("c", 5.0)].into_iter().collect();
        assert_eq!(
            weighted_jaccard(&set(&["a", "b", "c"]), &set(&["c", "d"]), Some(&boosted), None),
            0.625
        );
    }

    #[test]
    fn test_sub_unit_weights_clamped() {
        // Weights below 1 count as 1, so this reduces to plain Jaccard.
        let tiny: HashMap<&str, f64> = [("c", 0.001)].into_iter().collect();
        assert_eq!(
            weighted_jaccard(&set(&["a", "b", "c"]), &set(&["c", "d"]), Some(&tiny), None),
            0.25
        );
    }

    #[test]
    fn test_max_intersections() {
        let a = set(&["a", "b", "c"]);
        let b = set(&["a", "b", "c", "d"]);
        let weights: HashMap<&str, f64> = [("a", 5.0), ("b", 5.0), ("c", 5.0), ("d", 1.0)]
            .into_iter()
            .collect();

        assert_eq!(weighted_jaccard(&a, &b, Some(&weights), Some(4)), 0.9375);
        assert_eq!(weighted_jaccard(&a, &b, Some(&weights), Some(3)), 0.9375);
        assert_eq!(weighted_jaccard(&a, &b, Some(&weights), Some(1)), 0.625);
        assert_eq!(weighted_jaccard(&a, &b, Some(&weights), Some(0)), 0.0);
    }

    #[test]
    fn test_cap_monotonic() {
        // Tightening the cap never increases the score.
        let a = set(&["a", "b", "c", "d", "e"]);
        let b = set(&["a", "b", "c", "d", "f"]);
        let weights: HashMap<&str, f64> = [("a", 9.0), ("b", 7.0), ("c", 3.0), ("d", 2.0)]
            .into_iter()
            .collect();
        let mut previous = f64::INFINITY;
        for cap in (0..=5).rev() {
            let score = weighted_jaccard(&a, &b, Some(&weights), Some(cap));
            assert!(score <= previous, "cap {cap} increased the score");
            previous = score;
        }
    }
}
