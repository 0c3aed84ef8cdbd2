//! In-memory catalog snapshot.
//!
//! A concrete [`Catalog`] backed by plain maps, assembled from raw rows via
//! [`CatalogBuilder`]. Production deployments would put a database behind
//! the trait instead; this implementation serves embedded catalogs and
//! tests, and is where genre depths get materialized.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::catalog::genres::compute_genre_depths;
use crate::catalog::Catalog;
use crate::error::Result;
use crate::types::{Genre, GenreId, Trope, TropeId, WorkId};

/// Immutable snapshot of catalog data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    tropes: HashMap<TropeId, Arc<Trope>>,
    work_tropes: HashMap<WorkId, HashSet<TropeId>>,
    trope_works: HashMap<TropeId, HashSet<WorkId>>,
    work_genres: HashMap<WorkId, HashSet<Genre>>,
}

impl InMemoryCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    fn filtered_trope(
        &self,
        trope_id: TropeId,
        tag_filter: Option<&HashSet<String>>,
    ) -> Option<&Arc<Trope>> {
        self.tropes
            .get(&trope_id)
            .filter(|t| t.matches_filter(tag_filter))
    }
}

impl Catalog for InMemoryCatalog {
    fn tropes_by_work(
        &self,
        work_ids: &HashSet<WorkId>,
        tag_filter: Option<&HashSet<String>>,
    ) -> HashMap<WorkId, HashSet<Arc<Trope>>> {
        work_ids
            .iter()
            .filter_map(|work_id| {
                let trope_ids = self.work_tropes.get(work_id)?;
                let tropes = trope_ids
                    .iter()
                    .filter_map(|&tid| self.filtered_trope(tid, tag_filter))
                    .cloned()
                    .collect();
                Some((*work_id, tropes))
            })
            .collect()
    }

    fn work_ids_with_any_trope(&self, trope_ids: &HashSet<TropeId>) -> HashSet<WorkId> {
        trope_ids
            .iter()
            .filter_map(|tid| self.trope_works.get(tid))
            .flatten()
            .copied()
            .collect()
    }

    fn trope_occurrence_counts(
        &self,
        tag_filter: Option<&HashSet<String>>,
    ) -> HashMap<TropeId, u64> {
        self.trope_works
            .iter()
            .filter(|(_, works)| !works.is_empty())
            .filter(|(&tid, _)| self.filtered_trope(tid, tag_filter).is_some())
            .map(|(&tid, works)| (tid, works.len() as u64))
            .collect()
    }

    fn genres_for_works(&self, work_ids: &HashSet<WorkId>) -> HashMap<WorkId, HashSet<Genre>> {
        work_ids
            .iter()
            .filter_map(|work_id| {
                self.work_genres
                    .get(work_id)
                    .map(|genres| (*work_id, genres.clone()))
            })
            .collect()
    }
}

/// Builder assembling an [`InMemoryCatalog`] from raw rows.
///
/// Genre depths are computed once at `build` time; a cyclic parent chain
/// makes `build` fail rather than producing bogus depths.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    tropes: HashMap<TropeId, Arc<Trope>>,
    work_tropes: HashMap<WorkId, HashSet<TropeId>>,
    genre_names: HashMap<GenreId, Arc<str>>,
    genre_parents: HashMap<GenreId, Option<GenreId>>,
    work_genre_ids: HashMap<WorkId, HashSet<GenreId>>,
}

impl CatalogBuilder {
    /// Register a trope with its tags.
    pub fn trope<I, S>(mut self, id: TropeId, name: &str, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tropes.insert(id, Arc::new(Trope::new(id, name, tags)));
        self
    }

    /// Register a work with its trope ids. Trope ids with no registered
    /// trope row are dropped at build time.
    pub fn work(mut self, id: WorkId, trope_ids: &[TropeId]) -> Self {
        self.work_tropes
            .entry(id)
            .or_default()
            .extend(trope_ids.iter().copied());
        self
    }

    /// Register a genre and its optional parent.
    pub fn genre(mut self, id: GenreId, name: &str, parent: Option<GenreId>) -> Self {
        self.genre_names.insert(id, Arc::from(name));
        self.genre_parents.insert(id, parent);
        self
    }

    /// Attach genres to a work.
    pub fn work_genres(mut self, work_id: WorkId, genre_ids: &[GenreId]) -> Self {
        self.work_genre_ids
            .entry(work_id)
            .or_default()
            .extend(genre_ids.iter().copied());
        self
    }

    pub fn build(self) -> Result<InMemoryCatalog> {
        let depths = compute_genre_depths(&self.genre_parents)?;

        let mut work_tropes: HashMap<WorkId, HashSet<TropeId>> = HashMap::new();
        let mut trope_works: HashMap<TropeId, HashSet<WorkId>> = HashMap::new();
        for (work_id, trope_ids) in self.work_tropes {
            let known: HashSet<TropeId> = trope_ids
                .into_iter()
                .filter(|tid| self.tropes.contains_key(tid))
                .collect();
            for &tid in &known {
                trope_works.entry(tid).or_default().insert(work_id);
            }
            work_tropes.insert(work_id, known);
        }

        let work_genres = self
            .work_genre_ids
            .into_iter()
            .map(|(work_id, genre_ids)| {
                let genres = genre_ids
                    .into_iter()
                    .filter_map(|gid| {
                        let name = self.genre_names.get(&gid)?;
                        Some(Genre {
                            name: Arc::clone(name),
                            depth: depths.get(&gid).copied().unwrap_or(0),
                        })
                    })
                    .collect();
                (work_id, genres)
            })
            .collect();

        Ok(InMemoryCatalog {
            tropes: self.tropes,
            work_tropes,
            trope_works,
            work_genres,
        })
    }
}
