//! Scoring pipeline - from trope sets to ranked recommendations.
//!
//! The scoring system combines:
//! - Dunning log-likelihood distinctiveness of each reference-set trope
//! - Capped, weighted Jaccard overlap between trope sets
//! - A genre-affinity multiplier from root-genre overlap
//! - Orchestration that gathers candidates, scores, sorts and truncates

mod distinctiveness;
mod engine;
mod genre;
mod similarity;

pub use distinctiveness::score_trope_distinctiveness;
pub use engine::{SimilarWorks, SimilarWorksQuery, SimilarityEngine, DEFAULT_RESULT_LIMIT};
pub use genre::GenreAffinityScorer;
pub use similarity::{dunning_log_likelihood, weighted_jaccard};
