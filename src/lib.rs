//! tropematch - trope-based similar-works recommendations
//!
//! Recommends creative works similar to a reference set of works, based on
//! shared narrative tropes, weighted by how statistically distinctive each
//! trope is to the reference set versus the whole catalog, and adjusted by
//! root-genre overlap.
//!
//! # Architecture
//!
//! ```text
//! Catalog snapshot → reference tropes → candidates → distinctiveness
//!       ↓                                                  ↓
//!   Catalog trait        capped weighted Jaccard  ×  genre multiplier
//!                                       ↓
//!                           ranked work ids + trope scores
//! ```
//!
//! The engine is purely functional over immutable per-request snapshots:
//! all catalog data is fetched up front through the [`Catalog`] trait, and
//! per-candidate scoring fans out across rayon with nothing but shared
//! read-only maps.
//!
//! # Example
//!
//! ```
//! use tropematch::{InMemoryCatalog, SimilarityEngine, SimilarWorksQuery};
//!
//! let catalog = InMemoryCatalog::builder()
//!     .trope(1, "The Chosen One", ["plot"])
//!     .trope(2, "Dark Forest", ["setting"])
//!     .work(10, &[1, 2])
//!     .work(11, &[1, 2])
//!     .work(12, &[1])
//!     .build()
//!     .unwrap();
//!
//! let engine = SimilarityEngine::new(catalog);
//! let result = engine
//!     .find_similar_works(&SimilarWorksQuery::for_works(&[10]))
//!     .unwrap();
//! assert_eq!(result.ranked_work_ids, vec![11, 12]);
//! ```

pub mod catalog;
mod config;
pub mod error;
pub mod scoring;
pub mod types;

// Re-export the core surface
pub use catalog::{Catalog, CatalogBuilder, InMemoryCatalog};
pub use error::{Error, Result};
pub use scoring::{
    dunning_log_likelihood, weighted_jaccard, GenreAffinityScorer, SimilarWorks,
    SimilarWorksQuery, SimilarityEngine,
};
pub use types::{Genre, GenreId, ScoringConfig, Trope, TropeId, WorkId};
