//! Additive neighbor scoring over the similarity graph.
//!
//! "Movies close to several of your picks beat movies close to just one."

use crate::error::EngineResult;
use crate::traits::{ensure_kind, prepare_seeds, top_k, RankedCandidate, RankingStrategy, ScoreOrder};
use data_loader::MovieId;
use similarity::{GraphKind, SimilarityGraph};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

/// Sums, for every candidate, the edge weights from each seed it is
/// connected to.
///
/// ## Algorithm
/// 1. For each seed, walk its neighbor list
/// 2. Add the edge weight to the neighbor's score (seeds are skipped)
/// 3. Sort by descending score, ties by ascending id
/// 4. Keep the first `k`, with no backfill when fewer exist
#[derive(Debug, Clone, Copy, Default)]
pub struct AdditiveNeighborStrategy;

impl RankingStrategy for AdditiveNeighborStrategy {
    fn name(&self) -> &str {
        "AdditiveNeighborStrategy"
    }

    fn graph_kind(&self) -> GraphKind {
        GraphKind::Similarity
    }

    fn score_order(&self) -> ScoreOrder {
        ScoreOrder::HigherIsBetter
    }

    #[instrument(skip(self, graph), fields(strategy = self.name()))]
    fn rank(
        &self,
        graph: &SimilarityGraph,
        seed_ids: &[MovieId],
        k: usize,
    ) -> EngineResult<Vec<RankedCandidate>> {
        let seeds = prepare_seeds(seed_ids)?;
        ensure_kind(graph, self.graph_kind(), self.name())?;

        let seed_set: HashSet<MovieId> = seeds.iter().copied().collect();
        let mut scores: HashMap<MovieId, f32> = HashMap::new();

        for &seed in &seeds {
            if !graph.contains_node(seed) {
                debug!("Seed {} is not in the graph, skipping", seed);
                continue;
            }
            for (candidate, weight) in graph.neighbors(seed) {
                if seed_set.contains(&candidate) {
                    continue;
                }
                *scores.entry(candidate).or_insert(0.0) += weight;
            }
        }

        debug!("{} connected candidates", scores.len());
        Ok(top_k(scores, self.score_order(), k))
    }
}
