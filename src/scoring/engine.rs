//! Ranking orchestration - from a reference work set to ranked
//! recommendations.
//!
//! The pipeline per request:
//!
//! ```text
//! reference tropes → candidate works → distinctiveness → genre multipliers
//!        ↓                                                      ↓
//!   capped weighted Jaccard per candidate  ×  genre multiplier  →  sort
//! ```
//!
//! Everything operates on an immutable snapshot fetched up front from the
//! [`Catalog`]; per-candidate scoring has no cross-candidate dependency and
//! fans out across the rayon pool.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::scoring::distinctiveness::score_trope_distinctiveness;
use crate::scoring::genre::GenreAffinityScorer;
use crate::scoring::similarity::weighted_jaccard;
use crate::types::{ScoringConfig, TropeId, WorkId};

/// Max results returned when a query does not say otherwise.
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Parameters for a similar-works request.
#[derive(Debug, Clone)]
pub struct SimilarWorksQuery {
    /// The reference works. Must be non-empty.
    pub work_ids: Vec<WorkId>,

    /// Max results to return. `None` means unlimited.
    pub limit: Option<usize>,

    /// Optional trope tag names to limit similarity scoring to.
    pub tag_filter: Option<HashSet<String>>,

    /// Optional trope tag name -> weight boosts for distinctiveness.
    pub tag_weights: Option<HashMap<String, f64>>,

    /// Whether to apply the genre-affinity multiplier.
    pub use_genre_weights: bool,
}

impl Default for SimilarWorksQuery {
    fn default() -> Self {
        Self {
            work_ids: Vec::new(),
            limit: Some(DEFAULT_RESULT_LIMIT),
            tag_filter: None,
            tag_weights: None,
            use_genre_weights: true,
        }
    }
}

impl SimilarWorksQuery {
    pub fn for_works(work_ids: &[WorkId]) -> Self {
        Self {
            work_ids: work_ids.to_vec(),
            ..Self::default()
        }
    }
}

/// Result of a similar-works request.
#[derive(Debug, Clone)]
pub struct SimilarWorks {
    /// Candidate work ids, most similar first. Ties order by ascending id.
    pub ranked_work_ids: Vec<WorkId>,

    /// Distinctiveness per reference-set trope. Not truncated with the
    /// ranking; callers use it to explain or filter results.
    pub distinctiveness: HashMap<TropeId, f64>,
}

/// The similarity-scoring and ranking engine.
///
/// Owns a catalog handle plus scoring configuration. Stateless between
/// requests: each call fetches a fresh snapshot through the catalog and
/// never mutates shared state.
pub struct SimilarityEngine<C> {
    catalog: C,
    config: ScoringConfig,
    genre_scorer: GenreAffinityScorer,
}

impl<C: Catalog + Sync> SimilarityEngine<C> {
    pub fn new(catalog: C) -> Self {
        Self::with_config(catalog, ScoringConfig::default())
    }

    pub fn with_config(catalog: C, config: ScoringConfig) -> Self {
        let genre_scorer = GenreAffinityScorer::new(&config);
        Self {
            catalog,
            config,
            genre_scorer,
        }
    }

    /// Find works similar to a reference set of works.
    ///
    /// Similarity is based on shared tropes, weighted by how distinctive
    /// each trope is to the reference set, with an optional genre-affinity
    /// multiplier on top.
    ///
    /// # Returns
    /// The ranked candidate ids plus the distinctiveness map for every
    /// trope in the (tag-filtered) reference set.
    pub fn find_similar_works(&self, query: &SimilarWorksQuery) -> Result<SimilarWorks> {
        if query.work_ids.is_empty() {
            return Err(Error::InvalidInput(
                "similar-works query needs at least one reference work".to_string(),
            ));
        }
        let reference_ids: HashSet<WorkId> = query.work_ids.iter().copied().collect();
        let tag_filter = query.tag_filter.as_ref();

        // Reference tropes, unioned across the reference works.
        let reference_work_tropes = self.catalog.tropes_by_work(&reference_ids, tag_filter);
        let reference_trope_ids: HashSet<TropeId> = reference_work_tropes
            .values()
            .flatten()
            .map(|trope| trope.id)
            .collect();
        if reference_trope_ids.is_empty() {
            debug!(references = reference_ids.len(), "reference set has no tropes");
            return Ok(SimilarWorks {
                ranked_work_ids: Vec::new(),
                distinctiveness: HashMap::new(),
            });
        }

        // Works sharing any relevant trope, minus the reference set itself.
        let candidate_ids: HashSet<WorkId> = self
            .catalog
            .work_ids_with_any_trope(&reference_trope_ids)
            .into_iter()
            .filter(|work_id| !reference_ids.contains(work_id))
            .collect();
        debug!(
            references = reference_ids.len(),
            reference_tropes = reference_trope_ids.len(),
            candidates = candidate_ids.len(),
            "scoring candidate works"
        );

        let corpus_counts = self.catalog.trope_occurrence_counts(tag_filter);
        let distinctiveness = score_trope_distinctiveness(
            &reference_work_tropes,
            &corpus_counts,
            tag_filter,
            query.tag_weights.as_ref(),
        );

        let genre_multipliers = if query.use_genre_weights {
            let involved: HashSet<WorkId> =
                reference_ids.union(&candidate_ids).copied().collect();
            let work_genres = self.catalog.genres_for_works(&involved);
            self.genre_scorer
                .multipliers(&work_genres, &reference_ids, &candidate_ids)?
        } else {
            candidate_ids.iter().map(|&id| (id, 1.0)).collect()
        };

        let candidate_tropes = self.catalog.tropes_by_work(&candidate_ids, tag_filter);

        // Per-candidate scoring reads only shared immutable maps.
        let mut scored: Vec<(WorkId, f64)> = candidate_ids
            .par_iter()
            .map(|&candidate_id| {
                let trope_ids: HashSet<TropeId> = candidate_tropes
                    .get(&candidate_id)
                    .map(|tropes| tropes.iter().map(|t| t.id).collect())
                    .unwrap_or_default();
                let base = weighted_jaccard(
                    &reference_trope_ids,
                    &trope_ids,
                    Some(&distinctiveness),
                    self.config.max_trope_intersections,
                );
                let genre_weight = genre_multipliers
                    .get(&candidate_id)
                    .copied()
                    .unwrap_or(1.0);
                (candidate_id, base * genre_weight)
            })
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        if let Some(limit) = query.limit {
            scored.truncate(limit);
        }

        Ok(SimilarWorks {
            ranked_work_ids: scored.into_iter().map(|(work_id, _)| work_id).collect(),
            distinctiveness,
        })
    }

    /// Borrow the engine's scoring configuration.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }
}
