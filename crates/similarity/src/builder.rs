//! Similarity Graph Builder
//!
//! Builds a graph over the whole catalog by scoring every unordered pair of
//! movies.
//!
//! ## Algorithm
//! 1. Validate the input (unique ids, usable ratings)
//! 2. Add every movie as a node
//! 3. For every pair (i, j > i), score the pair
//! 4. Keep the edge if the score passes the threshold
//!
//! ## Scaling
//! The pair scan is O(n²). Pairs are independent and side-effect free, so
//! the outer loop runs on rayon and the edge set doesn't depend on
//! scheduling. This is comfortable up to a few thousand movies; beyond that
//! the catalog needs blocking/bucketing before pairing.

use crate::error::GraphError;
use crate::graph::{GraphKind, SimilarityGraph};
use crate::weights::{DistanceWeights, SimilarityWeights};
use data_loader::{Movie, MovieId};
use rayon::prelude::*;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Default minimum similarity for an edge to be materialized
pub const DEFAULT_MIN_EDGE_WEIGHT: f32 = 0.1;

/// Default maximum distance for a distance-graph edge (1.0 keeps every pair)
pub const DEFAULT_MAX_EDGE_DISTANCE: f32 = 1.0;

/// Builds similarity and distance graphs from a catalog snapshot
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    weights: SimilarityWeights,
    distance_weights: DistanceWeights,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the additive similarity weights
    pub fn with_weights(mut self, weights: SimilarityWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Configure the distance-graph weights
    pub fn with_distance_weights(mut self, weights: DistanceWeights) -> Self {
        self.distance_weights = weights;
        self
    }

    pub fn weights(&self) -> &SimilarityWeights {
        &self.weights
    }

    /// Build the additive similarity graph.
    ///
    /// An edge exists iff the pair score is at least `min_edge_weight`.
    #[instrument(skip(self, movies), fields(movies = movies.len()))]
    pub fn build(&self, movies: &[Movie], min_edge_weight: f32) -> Result<SimilarityGraph, GraphError> {
        let weights = self.weights;
        self.build_with(GraphKind::Similarity, movies, |a, b| {
            let score = weights.score(a, b);
            (score >= min_edge_weight).then_some(score)
        })
    }

    /// Build the distance graph used by shortest-path ranking.
    ///
    /// An edge exists iff the pair distance is at most `max_edge_distance`.
    #[instrument(skip(self, movies), fields(movies = movies.len()))]
    pub fn build_distance(
        &self,
        movies: &[Movie],
        max_edge_distance: f32,
    ) -> Result<SimilarityGraph, GraphError> {
        let weights = self.distance_weights;
        self.build_with(GraphKind::Distance, movies, |a, b| {
            let distance = weights.distance(a, b);
            (distance <= max_edge_distance).then_some(distance)
        })
    }

    /// Build a graph of the given kind.
    pub fn build_kind(
        &self,
        kind: GraphKind,
        movies: &[Movie],
        threshold: f32,
    ) -> Result<SimilarityGraph, GraphError> {
        match kind {
            GraphKind::Similarity => self.build(movies, threshold),
            GraphKind::Distance => self.build_distance(movies, threshold),
        }
    }

    fn build_with<F>(
        &self,
        kind: GraphKind,
        movies: &[Movie],
        edge_weight: F,
    ) -> Result<SimilarityGraph, GraphError>
    where
        F: Fn(&Movie, &Movie) -> Option<f32> + Sync,
    {
        let start = Instant::now();
        validate_input(movies)?;

        let mut graph = SimilarityGraph::new(kind);
        for movie in movies {
            graph.add_node(movie.id);
        }

        let n = movies.len();
        let edges: Vec<(MovieId, MovieId, f32)> = (0..n)
            .into_par_iter()
            .fold(Vec::new, |mut local, i| {
                let a = &movies[i];
                for b in &movies[i + 1..] {
                    if let Some(weight) = edge_weight(a, b) {
                        local.push((a.id, b.id, weight));
                    }
                }
                local
            })
            .reduce(Vec::new, |mut acc, mut local| {
                acc.append(&mut local);
                acc
            });

        debug!("Scored {} pairs, keeping {} edges", n * n.saturating_sub(1) / 2, edges.len());

        for (a, b, weight) in edges {
            graph.add_edge(a, b, weight)?;
        }

        info!(
            "Built {:?} graph: {} nodes, {} edges in {:.2?}",
            kind,
            graph.node_count(),
            graph.edge_count(),
            start.elapsed()
        );
        Ok(graph)
    }
}

/// Reject inputs that would make the graph ambiguous or the scores garbage
fn validate_input(movies: &[Movie]) -> Result<(), GraphError> {
    let mut seen: HashSet<MovieId> = HashSet::with_capacity(movies.len());
    for movie in movies {
        if !seen.insert(movie.id) {
            return Err(GraphError::DuplicateMovie { id: movie.id });
        }
        if let Some(rating) = movie.rating {
            if !rating.is_finite() {
                return Err(GraphError::MalformedAttribute {
                    id: movie.id,
                    field: "rating",
                    value: rating.to_string(),
                });
            }
        }
    }
    Ok(())
}
