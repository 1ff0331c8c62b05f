//! Ranking of recommendation candidates and explanation of matches.
//!
//! This crate provides:
//! - `RankingStrategy` trait and its two implementations
//! - `StrategyKind` for picking a strategy from configuration
//! - `ExplanationReporter` for per-seed match breakdowns
//!
//! ## Architecture
//! A request flows through these stages:
//! 1. The caller builds (or fetches from cache) the graph the strategy reads
//! 2. The strategy ranks non-seed candidates against the seeds
//! 3. The caller re-joins the ranked ids with catalog records
//!
//! ## Example Usage
//! ```ignore
//! use ranking::{recommend, ExplanationReporter};
//! use similarity::{GraphBuilder, DEFAULT_MIN_EDGE_WEIGHT};
//!
//! let graph = GraphBuilder::new().build(&movies, DEFAULT_MIN_EDGE_WEIGHT)?;
//! let ids = recommend(&graph, &[1, 2, 3, 4], 4)?;
//!
//! let report = ExplanationReporter::default().explain(&seed_movies, &target);
//! ```

pub mod error;
pub mod explain;
pub mod strategies;
pub mod traits;

// Re-export main types
pub use error::{EngineError, EngineResult};
pub use explain::{AttributeContribution, ExplanationReport, ExplanationReporter, SeedMatch};
pub use strategies::{AdditiveNeighborStrategy, ShortestPathStrategy, StrategyKind};
pub use traits::{RankedCandidate, RankingStrategy, ScoreOrder};

use data_loader::MovieId;
use similarity::SimilarityGraph;

/// Top `k` movie ids for the seeds, using the additive neighbor strategy
pub fn recommend(
    graph: &SimilarityGraph,
    seed_ids: &[MovieId],
    k: usize,
) -> EngineResult<Vec<MovieId>> {
    let ranked = AdditiveNeighborStrategy.rank(graph, seed_ids, k)?;
    Ok(ranked.into_iter().map(|c| c.movie_id).collect())
}
