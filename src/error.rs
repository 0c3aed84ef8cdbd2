//! Error types for the scoring engine.
//!
//! The scoring math is total over its domain - empty sets, zero totals and
//! missing entries all resolve to defined neutral values. The only failures
//! the engine itself can signal are caller precondition violations and
//! malformed catalog data caught at snapshot construction.

use thiserror::Error;

use crate::types::GenreId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A caller violated a precondition, e.g. asked for similar works with
    /// an empty reference set.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The genre parent chain loops back on itself. Reported at snapshot
    /// construction so depth computation never runs unbounded.
    #[error("genre hierarchy contains a cycle involving genre {0}")]
    GenreCycle(GenreId),
}
