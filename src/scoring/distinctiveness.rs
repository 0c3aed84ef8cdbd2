//! Trope distinctiveness scoring.
//!
//! Compares trope frequency inside a reference set of works against the
//! rest of the catalog. The result is a signed log-likelihood per trope:
//! positive means over-represented in the reference set, negative means
//! more common elsewhere. The engine feeds these scores into the weighted
//! Jaccard as element weights, and returns them to callers for explaining
//! and filtering results.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::scoring::similarity::dunning_log_likelihood;
use crate::types::{Trope, TropeId, WorkId};

/// Score the distinctiveness of tropes in a set of works.
///
/// # Arguments
/// * `work_to_tropes` - the reference works and their tropes
/// * `corpus_counts` - catalog-wide occurrence counts (same tag-filter
///   semantics), as supplied by the catalog collaborator
/// * `tag_filter` - optional tag names to limit scoring to
/// * `tag_weights` - optional tag name -> weight boosts
///
/// # Returns
/// Map of trope id to signed distinctiveness. Only tropes that occur in the
/// reference set get an entry.
pub fn score_trope_distinctiveness(
    work_to_tropes: &HashMap<WorkId, HashSet<Arc<Trope>>>,
    corpus_counts: &HashMap<TropeId, u64>,
    tag_filter: Option<&HashSet<String>>,
    tag_weights: Option<&HashMap<String, f64>>,
) -> HashMap<TropeId, f64> {
    let subset_counts = count_trope_occurrences(work_to_tropes, tag_filter);
    let subset_total: u64 = subset_counts.values().map(|(_, count)| count).sum();
    let corpus_total: u64 = corpus_counts.values().sum();

    let mut likelihoods: HashMap<TropeId, (Arc<Trope>, f64)> =
        HashMap::with_capacity(subset_counts.len());
    for (trope_id, (trope, subset_count)) in subset_counts {
        let corpus_count = corpus_counts.get(&trope_id).copied().unwrap_or(0);
        let likelihood = dunning_log_likelihood(
            subset_count,
            subset_total,
            corpus_count.saturating_sub(subset_count),
            corpus_total.saturating_sub(subset_total),
        );
        likelihoods.insert(trope_id, (trope, likelihood));
    }

    let weights = match tag_weights {
        Some(weights) if !weights.is_empty() => weights,
        _ => {
            return likelihoods
                .into_iter()
                .map(|(id, (_, score))| (id, score))
                .collect()
        }
    };

    // Tag weighting: seed with the unweighted score, then keep the best
    // weighted candidate across the trope's tags.
    likelihoods
        .into_iter()
        .map(|(id, (trope, raw))| {
            let mut best = raw;
            for tag in &trope.tags {
                if let Some(weight) = weights.get(tag.as_ref()) {
                    best = best.max(raw * weight);
                }
            }
            (id, best)
        })
        .collect()
}

/// Total occurrences of each trope across the given works.
///
/// A trope is counted once per work containing it, and only when it passes
/// the tag filter. The trope instance rides along so tag weighting can see
/// its tags without another lookup.
fn count_trope_occurrences(
    work_to_tropes: &HashMap<WorkId, HashSet<Arc<Trope>>>,
    tag_filter: Option<&HashSet<String>>,
) -> HashMap<TropeId, (Arc<Trope>, u64)> {
    let mut counts: HashMap<TropeId, (Arc<Trope>, u64)> = HashMap::new();
    for tropes in work_to_tropes.values() {
        for trope in tropes {
            if !trope.matches_filter(tag_filter) {
                continue;
            }
            counts
                .entry(trope.id)
                .or_insert_with(|| (Arc::clone(trope), 0))
                .1 += 1;
        }
    }
    counts
}
