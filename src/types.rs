//! Core types for tropematch - the trope-based similar-works finder.
//!
//! Key design decisions:
//! - `Arc<str>` for shared ownership of interned names and tag labels
//! - Entities compare by stable integer id, never by instance identity,
//!   so re-fetched copies of the same logical trope dedupe inside sets
//! - Frozen/immutable by default: everything here is a per-request snapshot

use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Stable identifier for a trope.
pub type TropeId = u64;

/// Stable identifier for a creative work.
pub type WorkId = u64;

/// Stable identifier for a genre.
pub type GenreId = u64;

/// A named narrative pattern found in creative works.
///
/// Tags are classification labels ("plot", "setting", ...) used to scope
/// comparisons and to apply per-category weighting.
#[derive(Debug, Clone)]
pub struct Trope {
    pub id: TropeId,
    pub name: Arc<str>,
    pub tags: HashSet<Arc<str>>,
}

impl Trope {
    pub fn new<I, S>(id: TropeId, name: &str, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            id,
            name: Arc::from(name),
            tags: tags.into_iter().map(|t| Arc::from(t.as_ref())).collect(),
        }
    }

    /// Whether this trope passes a tag filter.
    ///
    /// A missing or empty filter passes everything; otherwise the trope
    /// needs at least one tag in the filter.
    pub fn matches_filter(&self, tag_filter: Option<&HashSet<String>>) -> bool {
        match tag_filter {
            None => true,
            Some(filter) if filter.is_empty() => true,
            Some(filter) => filter.iter().any(|t| self.tags.contains(t.as_str())),
        }
    }
}

// Identity is the integer id. Two instances materialized from separate
// fetches are the same trope if their ids match.
impl PartialEq for Trope {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Trope {}

impl Hash for Trope {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A genre label carrying its depth in the genre hierarchy.
///
/// Depth counts parent hops to a root genre; 0 means root. Genre affinity
/// scoring only looks at root genres, so the depth travels with the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Genre {
    pub name: Arc<str>,
    pub depth: usize,
}

impl Genre {
    pub fn new(name: &str, depth: usize) -> Self {
        Self {
            name: Arc::from(name),
            depth,
        }
    }

    pub fn is_root(&self) -> bool {
        self.depth == 0
    }
}

/// When works are compared based on tropes, only the strongest this-many
/// shared tropes are counted. A cap keeps long tails of bland shared tropes
/// from drowning out distinctive ones.
pub const DEFAULT_MAX_TROPE_INTERSECTIONS: usize = 20;

/// Genres ignored when scoring genre affinity.
pub const DEFAULT_EXCLUDED_GENRES: &[&str] = &["Picaresque", "Dime Novel", "Sea Stories"];

/// Genres rewritten to a canonical name before affinity scoring, so merged
/// aliases count as the same genre.
pub const DEFAULT_MERGED_GENRES: &[(&str, &str)] = &[
    ("Mystery Lit", "Mystery Fiction"),
    ("Superhero Literature", "Speculative Fiction"),
    ("Legend", "Fables, Fairy Tales, and Folklore"),
    ("Mythology", "Fables, Fairy Tales, and Folklore"),
    ("Mythopoeia", "Fables, Fairy Tales, and Folklore"),
    ("Chivalric Romance", "Romance"),
];

/// Configuration for the scoring system.
///
/// All values are explicit immutable inputs to the scorers - there are no
/// module-level mutable tables. Override via `ScoringConfig::load` (TOML)
/// or construct directly in tests.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Cap on counted trope intersections per candidate. `None` = no cap.
    pub max_trope_intersections: Option<usize>,

    /// Genre names dropped before affinity scoring.
    pub excluded_genres: HashSet<String>,

    /// Genre alias -> canonical name rewrites applied before affinity scoring.
    pub merged_genres: HashMap<String, String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_trope_intersections: Some(DEFAULT_MAX_TROPE_INTERSECTIONS),
            excluded_genres: DEFAULT_EXCLUDED_GENRES
                .iter()
                .map(|g| g.to_string())
                .collect(),
            merged_genres: DEFAULT_MERGED_GENRES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }
}
