//! Genre affinity multipliers.
//!
//! A multiplicative signal applied on top of the trope-based similarity
//! score. Root-genre overlap between a candidate and the reference works
//! maps to a factor in [1, 2]: 1 means no shared root genres, 2 means
//! complete overlap with every reference work.

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::scoring::similarity::weighted_jaccard;
use crate::types::{Genre, ScoringConfig, WorkId};

/// Calculator for genre-overlap multipliers.
///
/// Curation tables (excluded genres, alias merges) come in through
/// [`ScoringConfig`] at construction time; the scorer itself is immutable.
pub struct GenreAffinityScorer {
    excluded: HashSet<String>,
    merged: HashMap<String, String>,
}

impl GenreAffinityScorer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            excluded: config.excluded_genres.clone(),
            merged: config.merged_genres.clone(),
        }
    }

    /// Compute a genre-affinity multiplier for each target work.
    ///
    /// Each target is compared with every reference work except itself via
    /// unweighted Jaccard over filtered root-genre sets, and the pairwise
    /// scores are averaged. A target with no eligible reference comparison
    /// gets the neutral multiplier 1.0.
    ///
    /// # Arguments
    /// * `work_to_genres` - genre sets covering the union of reference and
    ///   target works; works missing from the map count as having no genres
    /// * `reference_ids` - the reference work set; must be non-empty
    /// * `target_ids` - works to score against the references
    ///
    /// # Returns
    /// Map of target work id to multiplier in [1, 2].
    pub fn multipliers(
        &self,
        work_to_genres: &HashMap<WorkId, HashSet<Genre>>,
        reference_ids: &HashSet<WorkId>,
        target_ids: &HashSet<WorkId>,
    ) -> Result<HashMap<WorkId, f64>> {
        if reference_ids.is_empty() {
            return Err(Error::InvalidInput(
                "genre affinity needs a non-empty reference set".to_string(),
            ));
        }

        let empty = HashSet::new();
        let filtered: HashMap<WorkId, HashSet<Genre>> = reference_ids
            .iter()
            .chain(target_ids)
            .map(|&work_id| {
                let genres = work_to_genres.get(&work_id).unwrap_or(&empty);
                (work_id, self.filter_genres(genres))
            })
            .collect();

        let mut multipliers = HashMap::with_capacity(target_ids.len());
        for &target_id in target_ids {
            let target_genres = &filtered[&target_id];
            let mut total = 0.0;
            let mut comparisons = 0u32;
            for &reference_id in reference_ids {
                if reference_id == target_id {
                    continue;
                }
                total += weighted_jaccard(&filtered[&reference_id], target_genres, None, None);
                comparisons += 1;
            }
            let multiplier = if comparisons == 0 {
                // Target's only comparison would be itself; stay neutral.
                1.0
            } else {
                total / f64::from(comparisons) + 1.0
            };
            multipliers.insert(target_id, multiplier);
        }
        Ok(multipliers)
    }

    /// Keep root genres only, drop excluded names, rewrite merged aliases
    /// to their canonical name.
    fn filter_genres(&self, genres: &HashSet<Genre>) -> HashSet<Genre> {
        let mut filtered = HashSet::new();
        for genre in genres {
            if !genre.is_root() {
                continue;
            }
            if self.excluded.contains(genre.name.as_ref()) {
                continue;
            }
            match self.merged.get(genre.name.as_ref()) {
                Some(canonical) => filtered.insert(Genre::new(canonical, genre.depth)),
                None => filtered.insert(genre.clone()),
            };
        }
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DEFAULT_EXCLUDED_GENRES, DEFAULT_MERGED_GENRES};

    fn scorer() -> GenreAffinityScorer {
        GenreAffinityScorer::new(&ScoringConfig::default())
    }

    fn ids(values: &[WorkId]) -> HashSet<WorkId> {
        values.iter().copied().collect()
    }

    fn genre_map(entries: &[(WorkId, &[Genre])]) -> HashMap<WorkId, HashSet<Genre>> {
        entries
            .iter()
            .map(|(work_id, genres)| (*work_id, genres.iter().cloned().collect()))
            .collect()
    }

    #[test]
    fn test_happy() {
        let adventure = Genre::new("Adventure", 0);
        let horror = Genre::new("Horror", 0);
        let works = genre_map(&[
            (1, &[adventure.clone(), horror.clone()]),
            (2, &[adventure.clone()]),
            (3, &[adventure.clone(), horror.clone()]),
            (4, &[]),
        ]);

        let result = scorer().multipliers(&works, &ids(&[1]), &ids(&[2, 3, 4])).unwrap();
        assert_eq!(result[&2], 1.5);
        assert_eq!(result[&3], 2.0);
        assert_eq!(result[&4], 1.0);
    }

    #[test]
    fn test_multiple_references() {
        let adventure = Genre::new("Adventure", 0);
        let horror = Genre::new("Horror", 0);
        let works = genre_map(&[
            (1, &[adventure.clone()]),
            (2, &[horror.clone()]),
            (3, &[adventure.clone()]),
            (4, &[horror.clone()]),
        ]);

        let result = scorer().multipliers(&works, &ids(&[1, 2]), &ids(&[3, 4])).unwrap();
        assert_eq!(result[&3], 1.5);
        assert_eq!(result[&4], 1.5);
    }

    #[test]
    fn test_bounds() {
        let adventure = Genre::new("Adventure", 0);
        let horror = Genre::new("Horror", 0);

        // Disjoint genres: exactly 1. Identical: exactly 2.
        let works = genre_map(&[(1, &[adventure.clone()]), (2, &[horror.clone()])]);
        let result = scorer().multipliers(&works, &ids(&[1]), &ids(&[2])).unwrap();
        assert_eq!(result[&2], 1.0);

        let works = genre_map(&[(1, &[adventure.clone()]), (2, &[adventure.clone()])]);
        let result = scorer().multipliers(&works, &ids(&[1]), &ids(&[2])).unwrap();
        assert_eq!(result[&2], 2.0);
    }

    #[test]
    fn test_root_genres_only() {
        // A shared sub-genre does not count.
        let sub = Genre::new("High Fantasy", 1);
        let works = genre_map(&[(1, &[sub.clone()]), (2, &[sub.clone()])]);
        let result = scorer().multipliers(&works, &ids(&[1]), &ids(&[2])).unwrap();
        assert_eq!(result[&2], 1.0);
    }

    #[test]
    fn test_excluded_genres() {
        let excluded = Genre::new(DEFAULT_EXCLUDED_GENRES[0], 0);
        let works = genre_map(&[(1, &[excluded.clone()]), (2, &[excluded.clone()])]);
        let result = scorer().multipliers(&works, &ids(&[1]), &ids(&[2])).unwrap();
        assert_eq!(result[&2], 1.0);
    }

    #[test]
    fn test_merged_genres() {
        let (alias, canonical) = DEFAULT_MERGED_GENRES[0];
        let works = genre_map(&[
            (1, &[Genre::new(alias, 0)]),
            (2, &[Genre::new(canonical, 0)]),
        ]);
        let result = scorer().multipliers(&works, &ids(&[1]), &ids(&[2])).unwrap();
        assert_eq!(result[&2], 2.0);
    }

    #[test]
    fn test_missing_genre_data_is_neutral() {
        // Works absent from the genre map score as having no genres.
        let works = genre_map(&[]);
        let result = scorer().multipliers(&works, &ids(&[1]), &ids(&[2])).unwrap();
        assert_eq!(result[&2], 1.0);
    }

    #[test]
    fn test_self_only_reference_falls_back_to_neutral() {
        let adventure = Genre::new("Adventure", 0);
        let works = genre_map(&[(1, &[adventure.clone()])]);
        let result = scorer().multipliers(&works, &ids(&[1]), &ids(&[1])).unwrap();
        assert_eq!(result[&1], 1.0);
    }

    #[test]
    fn test_empty_reference_set_rejected() {
        let works = genre_map(&[]);
        let result = scorer().multipliers(&works, &ids(&[]), &ids(&[2]));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
