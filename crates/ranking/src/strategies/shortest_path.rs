//! Shortest-path ranking over the distance graph.
//!
//! Each seed runs Dijkstra over the whole graph; a candidate's score is the
//! sum of its shortest distances from the seeds, so lower is better.

use crate::error::EngineResult;
use crate::traits::{ensure_kind, prepare_seeds, top_k, RankedCandidate, RankingStrategy, ScoreOrder};
use data_loader::MovieId;
use petgraph::algo::dijkstra;
use similarity::{GraphKind, SimilarityGraph};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

/// Ranks by accumulated shortest-path distance from every seed.
///
/// Candidates that some in-graph seed cannot reach are left out (their
/// accumulated distance would be infinite). Seeds missing from the graph
/// contribute nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestPathStrategy;

impl RankingStrategy for ShortestPathStrategy {
    fn name(&self) -> &str {
        "ShortestPathStrategy"
    }

    fn graph_kind(&self) -> GraphKind {
        GraphKind::Distance
    }

    fn score_order(&self) -> ScoreOrder {
        ScoreOrder::LowerIsBetter
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
        let sources: Vec<MovieId> = seeds
            .into_iter()
            .filter(|&seed| graph.contains_node(seed))
            .collect();

        // (accumulated distance, number of seeds that reached the candidate)
        let mut totals: HashMap<MovieId, (f32, usize)> = HashMap::new();
        for &source in &sources {
            for (candidate, distance) in shortest_distances(graph, source) {
                if seed_set.contains(&candidate) {
                    continue;
                }
                let entry = totals.entry(candidate).or_insert((0.0, 0));
                entry.0 += distance;
                entry.1 += 1;
            }
        }

        let scores: HashMap<MovieId, f32> = totals
            .into_iter()
            .filter(|(_, (_, reached_by))| *reached_by == sources.len())
            .map(|(id, (total, _))| (id, total))
            .collect();

        debug!("{} candidates reachable from all {} seeds", scores.len(), sources.len());
        Ok(top_k(scores, self.score_order(), k))
    }
}

/// Single-source Dijkstra; returns the distance to every reachable node,
/// including `source` itself at 0.
pub fn shortest_distances(graph: &SimilarityGraph, source: MovieId) -> HashMap<MovieId, f32> {
    dijkstra(graph.as_graphmap(), source, None, |(_, _, &w)| w)
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn distance_graph(edges: &[(MovieId, MovieId, f32)]) -> SimilarityGraph {
        let mut graph = SimilarityGraph::new(GraphKind::Distance);
        for &(a, b, w) in edges {
            graph.add_edge(a, b, w).unwrap();
        }
        graph
    }

    #[test]
    fn test_dijkstra_prefers_cheaper_detour() {
        // Direct 1-3 costs 0.9, going through 2 costs 0.2 + 0.3
        let graph = distance_graph(&[(1, 2, 0.2), (2, 3, 0.3), (1, 3, 0.9)]);

        let distances = shortest_distances(&graph, 1);

        assert_eq!(distances[&1], 0.0);
        assert!((distances[&3] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_dijkstra_skips_other_components() {
        let mut graph = distance_graph(&[(1, 2, 0.4), (5, 6, 0.1)]);
        graph.add_node(9);

        let distances = shortest_distances(&graph, 1);

        assert_eq!(distances.len(), 2);
        assert!(!distances.contains_key(&5));
        assert!(!distances.contains_key(&9));
    }

    #[test]
    fn test_lowest_total_distance_first() {
        let graph = distance_graph(&[
            (1, 10, 0.1),
            (2, 10, 0.1),
            (1, 11, 0.3),
            (2, 11, 0.3),
            (1, 2, 0.8),
        ]);

        let ranked = ShortestPathStrategy.rank(&graph, &[1, 2], 4).unwrap();
        let ids: Vec<MovieId> = ranked.iter().map(|c| c.movie_id).collect();

        assert_eq!(ids, vec![10, 11]);
        assert!((ranked[0].score - 0.2).abs() < 1e-6);
        assert!(ranked[0].score <= ranked[1].score);
    }

    #[test]
    fn test_candidates_unreachable_from_a_seed_are_excluded() {
        // 20 hangs off seed 1 only; seed 2 lives in another component
        let graph = distance_graph(&[(1, 20, 0.1), (2, 30, 0.1)]);

        let ranked = ShortestPathStrategy.rank(&graph, &[1, 2], 4).unwrap();
        assert!(ranked.is_empty());

        let ranked = ShortestPathStrategy.rank(&graph, &[1], 4).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].movie_id, 20);
    }

    #[test]
    fn test_empty_seeds_rejected() {
        let graph = distance_graph(&[(1, 2, 0.5)]);
        let err = ShortestPathStrategy.rank(&graph, &[], 4).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)));
    }

    #[test]
    fn test_similarity_graph_rejected() {
        let graph = SimilarityGraph::new(GraphKind::Similarity);
        let err = ShortestPathStrategy.rank(&graph, &[1], 4).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)));
    }
}
