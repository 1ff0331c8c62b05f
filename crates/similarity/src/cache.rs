//! Owned cache of built graphs.
//!
//! A graph is only valid for the catalog revision it was built from. The
//! cache never updates a graph in place: a stale or missing entry is
//! replaced by a full rebuild through `rebuild`.

use crate::error::GraphError;
use crate::graph::{GraphKind, SimilarityGraph};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
struct CachedGraph {
    revision: u64,
    graph: Arc<SimilarityGraph>,
}

/// At most one graph per `GraphKind`, tagged with its catalog revision
#[derive(Debug, Default)]
pub struct GraphCache {
    entries: HashMap<GraphKind, CachedGraph>,
}

impl GraphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached graph of `kind` if it was built from `revision`
    pub fn get(&self, kind: GraphKind, revision: u64) -> Option<Arc<SimilarityGraph>> {
        self.entries
            .get(&kind)
            .filter(|entry| entry.revision == revision)
            .map(|entry| Arc::clone(&entry.graph))
    }

    /// Return the cached graph, rebuilding it first if it is missing or was
    /// built from another revision.
    pub fn get_or_rebuild<F>(
        &mut self,
        kind: GraphKind,
        revision: u64,
        build: F,
    ) -> Result<Arc<SimilarityGraph>, GraphError>
    where
        F: FnOnce() -> Result<SimilarityGraph, GraphError>,
    {
        if let Some(graph) = self.get(kind, revision) {
            debug!("Graph cache hit: {:?} at revision {}", kind, revision);
            return Ok(graph);
        }
        debug!("Graph cache miss: {:?} at revision {}", kind, revision);
        self.rebuild(kind, revision, build)
    }

    /// Build the whole graph from scratch and store it.
    ///
    /// On failure the previous entry for `kind` is dropped as well, so a
    /// failed rebuild never leaves an outdated graph behind.
    pub fn rebuild<F>(
        &mut self,
        kind: GraphKind,
        revision: u64,
        build: F,
    ) -> Result<Arc<SimilarityGraph>, GraphError>
    where
        F: FnOnce() -> Result<SimilarityGraph, GraphError>,
    {
        self.entries.remove(&kind);
        let graph = Arc::new(build()?);
        self.entries.insert(
            kind,
            CachedGraph {
                revision,
                graph: Arc::clone(&graph),
            },
        );
        Ok(graph)
    }

    /// Drop every cached graph
    pub fn invalidate(&mut self) {
        if !self.entries.is_empty() {
            debug!("Invalidating {} cached graph(s)", self.entries.len());
        }
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn tiny_graph() -> Result<SimilarityGraph, GraphError> {
        let mut graph = SimilarityGraph::new(GraphKind::Similarity);
        graph.add_edge(1, 2, 0.5)?;
        Ok(graph)
    }

    #[test]
    fn test_same_revision_reuses_graph() {
        let mut cache = GraphCache::new();
        let builds = Cell::new(0);
        let build = || {
            builds.set(builds.get() + 1);
            tiny_graph()
        };

        let first = cache.get_or_rebuild(GraphKind::Similarity, 1, build).unwrap();
        let second = cache.get_or_rebuild(GraphKind::Similarity, 1, build).unwrap();

        assert_eq!(builds.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_new_revision_forces_rebuild() {
        let mut cache = GraphCache::new();
        let builds = Cell::new(0);
        let build = || {
            builds.set(builds.get() + 1);
            tiny_graph()
        };

        cache.get_or_rebuild(GraphKind::Similarity, 1, build).unwrap();
        cache.get_or_rebuild(GraphKind::Similarity, 2, build).unwrap();

        assert_eq!(builds.get(), 2);
        assert!(cache.get(GraphKind::Similarity, 1).is_none());
        assert!(cache.get(GraphKind::Similarity, 2).is_some());
    }

    #[test]
    fn test_invalidate_drops_everything() {
        let mut cache = GraphCache::new();
        cache.rebuild(GraphKind::Similarity, 1, tiny_graph).unwrap();
        cache.invalidate();

        assert!(cache.is_empty());
        assert!(cache.get(GraphKind::Similarity, 1).is_none());
    }

    #[test]
    fn test_failed_rebuild_leaves_no_stale_graph() {
        let mut cache = GraphCache::new();
        cache.rebuild(GraphKind::Similarity, 1, tiny_graph).unwrap();

        let result = cache.rebuild(GraphKind::Similarity, 2, || {
            Err(GraphError::DuplicateMovie { id: 7 })
        });

        assert!(result.is_err());
        assert!(cache.get(GraphKind::Similarity, 1).is_none());
    }
}
