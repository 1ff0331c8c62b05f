//! Core traits for ranking candidates against a seed set.
//!
//! A `RankingStrategy` turns a graph plus seed ids into an ordered candidate
//! list. Exactly one strategy is used per request; which one is a
//! configuration choice.

use crate::error::{EngineError, EngineResult};
use data_loader::MovieId;
use serde::{Deserialize, Serialize};
use similarity::{GraphKind, SimilarityGraph};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Direction in which a strategy's scores improve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreOrder {
    /// Accumulated similarity: bigger is a better match
    HigherIsBetter,
    /// Accumulated distance: smaller is a better match
    LowerIsBetter,
}

impl ScoreOrder {
    /// Ordering that puts the better score first
    pub fn compare(self, a: f32, b: f32) -> Ordering {
        match self {
            ScoreOrder::HigherIsBetter => b.total_cmp(&a),
            ScoreOrder::LowerIsBetter => a.total_cmp(&b),
        }
    }
}

/// One ranked recommendation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub movie_id: MovieId,
    pub score: f32,
}

/// Core trait for ranking strategies.
///
/// ## Design Note
/// - `Send + Sync` so one strategy can serve concurrent requests
/// - Each strategy declares the graph kind it reads, so the caller can
///   build (or fetch from cache) the right graph
pub trait RankingStrategy: Send + Sync {
    /// Returns the name of this strategy (for logging/debugging)
    fn name(&self) -> &str;

    /// The graph this strategy ranks over
    fn graph_kind(&self) -> GraphKind;

    /// How to read the scores this strategy produces
    fn score_order(&self) -> ScoreOrder;

    /// Rank non-seed candidates for the given seeds.
    ///
    /// # Returns
    /// * `Ok(Vec<RankedCandidate>)` - at most `k` candidates, best first,
    ///   never containing a seed id
    /// * `Err(EngineError::InvalidArgument)` - empty seed list or a graph of
    ///   the wrong kind
    fn rank(
        &self,
        graph: &SimilarityGraph,
        seed_ids: &[MovieId],
        k: usize,
    ) -> EngineResult<Vec<RankedCandidate>>;
}

/// Deduplicate seeds (keeping first occurrence) and reject an empty list
pub(crate) fn prepare_seeds(seed_ids: &[MovieId]) -> EngineResult<Vec<MovieId>> {
    if seed_ids.is_empty() {
        return Err(EngineError::InvalidArgument(
            "at least one seed movie is required".to_string(),
        ));
    }
    let mut seen = HashSet::with_capacity(seed_ids.len());
    Ok(seed_ids.iter().copied().filter(|id| seen.insert(*id)).collect())
}

/// Fail if the graph isn't the kind the strategy reads
pub(crate) fn ensure_kind(
    graph: &SimilarityGraph,
    expected: GraphKind,
    strategy: &str,
) -> EngineResult<()> {
    if graph.kind() != expected {
        return Err(EngineError::InvalidArgument(format!(
            "{} ranks over a {:?} graph, got {:?}",
            strategy,
            expected,
            graph.kind()
        )));
    }
    Ok(())
}

/// Sort accumulated scores best-first (ties by ascending id) and keep `k`
pub(crate) fn top_k(
    scores: HashMap<MovieId, f32>,
    order: ScoreOrder,
    k: usize,
) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = scores
        .into_iter()
        .map(|(movie_id, score)| RankedCandidate { movie_id, score })
        .collect();

    ranked.sort_by(|a, b| {
        order
            .compare(a.score, b.score)
            .then_with(|| a.movie_id.cmp(&b.movie_id))
    });
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_seeds_dedups_in_order() {
        assert_eq!(prepare_seeds(&[3, 1, 3, 2, 1]).unwrap(), vec![3, 1, 2]);
    }

    #[test]
    fn test_prepare_seeds_rejects_empty() {
        assert!(matches!(
            prepare_seeds(&[]),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_top_k_breaks_ties_by_id() {
        let scores: HashMap<MovieId, f32> = [(9, 0.5), (4, 0.5), (7, 0.9), (1, 0.1)].into();

        let best: Vec<MovieId> = top_k(scores.clone(), ScoreOrder::HigherIsBetter, 3)
            .iter()
            .map(|c| c.movie_id)
            .collect();
        assert_eq!(best, vec![7, 4, 9]);

        let closest: Vec<MovieId> = top_k(scores, ScoreOrder::LowerIsBetter, 3)
            .iter()
            .map(|c| c.movie_id)
            .collect();
        assert_eq!(closest, vec![1, 4, 9]);
    }
}
