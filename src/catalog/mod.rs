//! Catalog data access - the read-only collaborator boundary.
//!
//! The scoring engine never talks to storage directly. It pulls everything
//! it needs through the [`Catalog`] trait at the start of a request and
//! treats the result as a frozen snapshot for the duration of that call.
//! Caching and invalidation live behind this seam; the trait only promises
//! internally consistent reads per call.

mod genres;
mod memory;

pub use genres::compute_genre_depths;
pub use memory::{CatalogBuilder, InMemoryCatalog};

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::types::{Genre, Trope, TropeId, WorkId};

/// Read-only query operations supplied by a catalog-data collaborator.
///
/// Unknown ids are simply absent from the returned maps - lookups never
/// panic and never invent empty placeholder entries.
pub trait Catalog {
    /// Tropes associated with each of the given works, optionally limited
    /// to tropes carrying at least one tag in `tag_filter`.
    fn tropes_by_work(
        &self,
        work_ids: &HashSet<WorkId>,
        tag_filter: Option<&HashSet<String>>,
    ) -> HashMap<WorkId, HashSet<Arc<Trope>>>;

    /// Works containing at least one of the given tropes.
    fn work_ids_with_any_trope(&self, trope_ids: &HashSet<TropeId>) -> HashSet<WorkId>;

    /// Catalog-wide occurrence counts: how many works carry each trope.
    /// Tropes with zero works are omitted. Same tag-filter semantics as
    /// [`Catalog::tropes_by_work`].
    fn trope_occurrence_counts(
        &self,
        tag_filter: Option<&HashSet<String>>,
    ) -> HashMap<TropeId, u64>;

    /// Genre labels (with hierarchy depth) for each of the given works.
    fn genres_for_works(&self, work_ids: &HashSet<WorkId>) -> HashMap<WorkId, HashSet<Genre>>;
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn tropes_by_work(
        &self,
        work_ids: &HashSet<WorkId>,
        tag_filter: Option<&HashSet<String>>,
    ) -> HashMap<WorkId, HashSet<Arc<Trope>>> {
        (**self).tropes_by_work(work_ids, tag_filter)
    }

    fn work_ids_with_any_trope(&self, trope_ids: &HashSet<TropeId>) -> HashSet<WorkId> {
        (**self).work_ids_with_any_trope(trope_ids)
    }

    fn trope_occurrence_counts(
        &self,
        tag_filter: Option<&HashSet<String>>,
    ) -> HashMap<TropeId, u64> {
        (**self).trope_occurrence_counts(tag_filter)
    }

    fn genres_for_works(&self, work_ids: &HashSet<WorkId>) -> HashMap<WorkId, HashSet<Genre>> {
        (**self).genres_for_works(work_ids)
    }
}
