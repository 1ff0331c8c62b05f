//! Error types for graph construction.

use data_loader::MovieId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// The same id appeared twice in one build input
    #[error("Duplicate movie {id} in graph input")]
    DuplicateMovie { id: MovieId },

    /// An attribute held a value the scoring functions can't use
    #[error("Malformed {field} on movie {id}: {value}")]
    MalformedAttribute {
        id: MovieId,
        field: &'static str,
        value: String,
    },

    /// A computed edge weight was not a finite, non-negative number
    #[error("Invalid edge weight {weight} between {a} and {b}")]
    InvalidWeight { a: MovieId, b: MovieId, weight: f32 },
}
