//! Errors surfaced to callers of the engine.
//!
//! Three kinds only: the caller sent something unusable, the caller asked
//! about something that doesn't exist, or the engine itself failed. None of
//! them are retried; the computation is deterministic.

use similarity::GraphError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Empty or malformed seed list, wrong seed count, unknown seed id, ...
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A movie the request depends on is not in the catalog
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unexpected failure, e.g. malformed attribute data during a graph build
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<GraphError> for EngineError {
    fn from(err: GraphError) -> Self {
        EngineError::Internal(format!("graph build failed: {}", err))
    }
}

/// Convenience type alias for engine results
pub type EngineResult<T> = std::result::Result<T, EngineError>;
