//! Request and response shapes exchanged with callers.
//!
//! Field names are camelCase on the wire.

use data_loader::{Movie, MovieId};
use ranking::{ExplanationReport, StrategyKind};
use serde::{Deserialize, Serialize};

/// Ask for recommendations from a set of seed movies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    pub seed_ids: Vec<MovieId>,
    /// Number of results; the configured default when absent
    #[serde(default)]
    pub k: Option<usize>,
}

impl RecommendRequest {
    pub fn new(seed_ids: Vec<MovieId>) -> Self {
        Self { seed_ids, k: None }
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = Some(k);
        self
    }
}

/// Final recommendation returned to the caller: the full catalog record
/// plus the strategy's score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecommendation {
    #[serde(flatten)]
    pub movie: Movie,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub seed_ids: Vec<MovieId>,
    pub strategy: StrategyKind,
    /// Best first; higher is better for `additive`, lower for `shortest-path`
    pub recommendations: Vec<MovieRecommendation>,
}

/// Reference to a catalog movie. Callers usually send whole records; only
/// the id is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRef {
    pub id: MovieId,
}

impl From<MovieId> for MovieRef {
    fn from(id: MovieId) -> Self {
        Self { id }
    }
}

/// Ask why `target_movie` matches the seeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainRequest {
    pub seed_movies: Vec<MovieRef>,
    pub target_movie: MovieRef,
}

impl ExplainRequest {
    pub fn new(seed_ids: &[MovieId], target_id: MovieId) -> Self {
        Self {
            seed_movies: seed_ids.iter().copied().map(MovieRef::from).collect(),
            target_movie: MovieRef::from(target_id),
        }
    }
}

pub type ExplainResponse = ExplanationReport;

/// Size of a built graph, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub revision: u64,
    pub node_count: usize,
    pub edge_count: usize,
}
