//! Genre-hierarchy depth computation.
//!
//! Depth is the number of parent hops to a root genre. It is computed once
//! per snapshot with a breadth-first pass from the roots, memoized in the
//! result map, instead of re-walking the parent chain per genre.

use std::collections::{HashMap, VecDeque};

use crate::error::{Error, Result};
use crate::types::GenreId;

/// Compute the depth of every genre from a parent-pointer map.
///
/// A genre with no parent, or whose parent id is not a known genre, is a
/// root (depth 0). A parent chain that loops back on itself is malformed
/// data and is rejected with [`Error::GenreCycle`] rather than looping.
pub fn compute_genre_depths(
    parents: &HashMap<GenreId, Option<GenreId>>,
) -> Result<HashMap<GenreId, usize>> {
    let mut children: HashMap<GenreId, Vec<GenreId>> = HashMap::new();
    let mut queue: VecDeque<(GenreId, usize)> = VecDeque::new();

    for (&genre_id, parent) in parents {
        match parent {
            Some(parent_id) if parents.contains_key(parent_id) => {
                children.entry(*parent_id).or_default().push(genre_id);
            }
            // No parent, or a dangling parent id: treat as root.
            _ => queue.push_back((genre_id, 0)),
        }
    }

    let mut depths: HashMap<GenreId, usize> = HashMap::with_capacity(parents.len());
    while let Some((genre_id, depth)) = queue.pop_front() {
        depths.insert(genre_id, depth);
        if let Some(kids) = children.get(&genre_id) {
            for &kid in kids {
                queue.push_back((kid, depth + 1));
            }
        }
    }

    // Anything the BFS never reached hangs off a cycle.
    if depths.len() != parents.len() {
        let in_cycle = parents
            .keys()
            .filter(|id| !depths.contains_key(*id))
            .min()
            .copied()
            .unwrap_or_default();
        return Err(Error::GenreCycle(in_cycle));
    }

    Ok(depths)
}
