//! Undirected weighted graph over movie ids.

use crate::error::GraphError;
use data_loader::MovieId;
use petgraph::graphmap::UnGraphMap;
use serde::{Deserialize, Serialize};

/// How edge weights are to be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphKind {
    /// Higher weight means more alike
    Similarity,
    /// Lower weight means closer; 0 is identical
    Distance,
}

/// Undirected weighted graph keyed by movie id.
///
/// Invariants (enforced by `add_edge`):
/// - no self-loops
/// - at most one edge per unordered pair
/// - weights are finite and non-negative
///
/// Every movie the graph was built from is a node, even without edges.
#[derive(Debug, Clone)]
pub struct SimilarityGraph {
    kind: GraphKind,
    graph: UnGraphMap<MovieId, f32>,
}

impl SimilarityGraph {
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            graph: UnGraphMap::new(),
        }
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Add an isolated node (no-op if it already exists)
    pub fn add_node(&mut self, id: MovieId) {
        self.graph.add_node(id);
    }

    /// Add or overwrite the undirected edge `a - b`.
    ///
    /// Self-loops are rejected silently (a movie is never its own
    /// neighbor); invalid weights are an error.
    pub fn add_edge(&mut self, a: MovieId, b: MovieId, weight: f32) -> Result<(), GraphError> {
        if a == b {
            return Ok(());
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight { a, b, weight });
        }

        self.graph.add_edge(a, b, weight);
        Ok(())
    }

    /// Neighbors of a node with their edge weights.
    ///
    /// Unknown nodes have no neighbors.
    pub fn neighbors(&self, id: MovieId) -> impl Iterator<Item = (MovieId, f32)> + '_ {
        self.graph.edges(id).map(|(_, neighbor, &w)| (neighbor, w))
    }

    pub fn degree(&self, id: MovieId) -> usize {
        self.graph.neighbors(id).count()
    }

    pub fn weight(&self, a: MovieId, b: MovieId) -> Option<f32> {
        self.graph.edge_weight(a, b).copied()
    }

    pub fn has_edge(&self, a: MovieId, b: MovieId) -> bool {
        self.graph.contains_edge(a, b)
    }

    pub fn contains_node(&self, id: MovieId) -> bool {
        self.graph.contains_node(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node ids, ascending
    pub fn nodes(&self) -> Vec<MovieId> {
        let mut nodes: Vec<MovieId> = self.graph.nodes().collect();
        nodes.sort_unstable();
        nodes
    }

    /// Underlying petgraph map, for running `petgraph::algo` over
    pub fn as_graphmap(&self) -> &UnGraphMap<MovieId, f32> {
        &self.graph
    }
}
