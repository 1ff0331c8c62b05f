//! # Recommendation Service
//!
//! Coordinates one request end to end:
//! 1. Validate the seed list against the catalog
//! 2. Take a consistent catalog snapshot (read lock)
//! 3. Fetch the graph for the active strategy from the cache, rebuilding it
//!    from the snapshot when the catalog revision moved
//! 4. Rank candidates
//! 5. Re-join ranked ids with their catalog records
//!
//! Graph builds and ranking are CPU-bound and run under
//! `tokio::task::spawn_blocking`. Either the whole response is produced or
//! an error is returned; there are no partial lists.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use data_loader::{Catalog, Movie, MovieId};
use ranking::{EngineError, EngineResult, ExplanationReporter, RankingStrategy};
use similarity::{GraphBuilder, GraphCache, GraphKind, SimilarityGraph};
use tracing::{debug, info, instrument, warn};

use crate::api::{
    ExplainRequest, ExplainResponse, GraphStats, MovieRecommendation, RecommendRequest,
    RecommendResponse,
};
use crate::config::EngineConfig;

/// Shared recommendation service; cheap to clone, every clone sees the same
/// catalog and graph cache
#[derive(Clone)]
pub struct RecommendationService {
    catalog: Arc<RwLock<Catalog>>,
    cache: Arc<Mutex<GraphCache>>,
    config: Arc<EngineConfig>,
    strategy: Arc<dyn RankingStrategy>,
    builder: GraphBuilder,
    reporter: ExplanationReporter,
}

impl RecommendationService {
    /// Create a service over `catalog`, ranking with `config.strategy`
    pub fn new(catalog: Catalog, config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let builder = GraphBuilder::new();
        let reporter = ExplanationReporter::new(*builder.weights());
        let strategy = config.strategy.build();

        info!(
            "Recommendation service ready: {} movies, strategy {}",
            catalog.len(),
            config.strategy
        );

        Ok(Self {
            catalog: Arc::new(RwLock::new(catalog)),
            cache: Arc::new(Mutex::new(GraphCache::new())),
            config: Arc::new(config),
            strategy,
            builder,
            reporter,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of movies currently in the catalog
    pub fn catalog_len(&self) -> EngineResult<usize> {
        Ok(self.read_catalog()?.len())
    }

    /// Catalog record for `id`, if present
    pub fn movie(&self, id: MovieId) -> EngineResult<Option<Movie>> {
        Ok(self.read_catalog()?.get_movie(id).cloned())
    }

    /// Every movie id in the catalog, ascending
    pub fn movie_ids(&self) -> EngineResult<Vec<MovieId>> {
        Ok(self.read_catalog()?.all_movie_ids())
    }

    /// Title search over the current catalog, best matches first
    pub fn search_by_title(&self, query: &str) -> EngineResult<Vec<Movie>> {
        Ok(self
            .read_catalog()?
            .search_by_title(query)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Main entry point: recommend movies for a seed set
    #[instrument(skip(self, request), fields(seeds = request.seed_ids.len()))]
    pub async fn recommend(&self, request: RecommendRequest) -> EngineResult<RecommendResponse> {
        let start_time = Instant::now();

        let k = self.resolve_k(request.k)?;
        self.check_seed_shape(&request.seed_ids, true)?;

        let service = self.clone();
        let seed_ids = request.seed_ids.clone();
        let recommendations =
            tokio::task::spawn_blocking(move || service.recommend_blocking(&seed_ids, k))
                .await
                .map_err(|e| EngineError::Internal(format!("recommendation task failed: {}", e)))??;

        info!(
            "Recommended {} movies for seeds {:?} in {:.2?}",
            recommendations.len(),
            request.seed_ids,
            start_time.elapsed()
        );

        Ok(RecommendResponse {
            seed_ids: request.seed_ids,
            strategy: self.config.strategy,
            recommendations,
        })
    }

    /// Explain how the target relates to each seed
    #[instrument(skip(self, request), fields(target = request.target_movie.id))]
    pub async fn explain(&self, request: ExplainRequest) -> EngineResult<ExplainResponse> {
        let seed_ids: Vec<MovieId> = request.seed_movies.iter().map(|m| m.id).collect();
        self.check_seed_shape(&seed_ids, false)?;

        let (seeds, target) = {
            let catalog = self.read_catalog()?;
            check_seeds_exist(&catalog, &seed_ids)?;

            let target_id = request.target_movie.id;
            let target = catalog
                .get_movie(target_id)
                .cloned()
                .ok_or_else(|| EngineError::NotFound(format!("target movie {}", target_id)))?;
            let seeds: Vec<Movie> = seed_ids
                .iter()
                .filter_map(|id| catalog.get_movie(*id).cloned())
                .collect();
            (seeds, target)
        };

        let report = self.reporter.explain(&seeds, &target);
        debug!(
            "Explained movie {}: {} matching seeds, total {:.3}",
            target.id,
            report.matches.len(),
            report.total_score
        );
        Ok(report)
    }

    /// Insert or replace a movie. Cached graphs are dropped.
    pub fn upsert_movie(&self, movie: Movie) -> EngineResult<Option<Movie>> {
        let mut catalog = self.write_catalog()?;
        let id = movie.id;
        let previous = catalog.insert_movie(movie);
        self.lock_cache()?.invalidate();
        info!(
            "{} movie {} (catalog revision {})",
            if previous.is_some() { "Replaced" } else { "Inserted" },
            id,
            catalog.revision()
        );
        Ok(previous)
    }

    /// Remove a movie. Cached graphs are dropped.
    pub fn remove_movie(&self, id: MovieId) -> EngineResult<Movie> {
        let mut catalog = self.write_catalog()?;
        let removed = catalog
            .remove_movie(id)
            .ok_or_else(|| EngineError::NotFound(format!("movie {}", id)))?;
        self.lock_cache()?.invalidate();
        info!("Removed movie {} (catalog revision {})", id, catalog.revision());
        Ok(removed)
    }

    /// Node and edge counts of the graph of `kind` for the current catalog,
    /// building it if needed
    pub async fn graph_stats(&self, kind: GraphKind) -> EngineResult<GraphStats> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || -> EngineResult<GraphStats> {
            let catalog = service.read_catalog()?;
            let graph = service.graph_for(&catalog, kind)?;
            Ok(GraphStats {
                revision: catalog.revision(),
                node_count: graph.node_count(),
                edge_count: graph.edge_count(),
            })
        })
        .await
        .map_err(|e| EngineError::Internal(format!("graph stats task failed: {}", e)))?
    }

    fn recommend_blocking(&self, seed_ids: &[MovieId], k: usize) -> EngineResult<Vec<MovieRecommendation>> {
        // The read guard is held until the response is assembled, so ranking
        // and re-joining see the same catalog revision.
        let catalog = self.read_catalog()?;
        check_seeds_exist(&catalog, seed_ids)?;

        let graph = self.graph_for(&catalog, self.strategy.graph_kind())?;
        let ranked = self.strategy.rank(&graph, seed_ids, k)?;

        ranked
            .into_iter()
            .map(|candidate| {
                let movie = catalog.get_movie(candidate.movie_id).cloned().ok_or_else(|| {
                    EngineError::Internal(format!(
                        "ranked movie {} missing from catalog revision {}",
                        candidate.movie_id,
                        catalog.revision()
                    ))
                })?;
                Ok(MovieRecommendation {
                    movie,
                    score: candidate.score,
                })
            })
            .collect()
    }

    /// Cached graph for the catalog's revision, rebuilt from a full snapshot
    /// on a miss.
    ///
    /// The cache lock is held for the whole O(n²) rebuild. Concurrent
    /// requests for the same kind wait for it and reuse the result instead
    /// of building the graph twice; requests for the other kind wait too.
    fn graph_for(&self, catalog: &Catalog, kind: GraphKind) -> EngineResult<Arc<SimilarityGraph>> {
        let threshold = self.config.threshold_for(kind);
        let graph = self
            .lock_cache()?
            .get_or_rebuild(kind, catalog.revision(), || {
                self.builder.build_kind(kind, &catalog.snapshot(), threshold)
            })?;
        Ok(graph)
    }

    fn resolve_k(&self, k: Option<usize>) -> EngineResult<usize> {
        match k.unwrap_or(self.config.default_k) {
            0 => Err(EngineError::InvalidArgument("k must be at least 1".to_string())),
            k => Ok(k),
        }
    }

    /// Checks that need no catalog access: non-empty, no duplicates and,
    /// when `enforce_count`, the configured exact seed count
    fn check_seed_shape(&self, seed_ids: &[MovieId], enforce_count: bool) -> EngineResult<()> {
        if seed_ids.is_empty() {
            return Err(EngineError::InvalidArgument(
                "at least one seed movie is required".to_string(),
            ));
        }

        let required = self.config.required_seed_count;
        if enforce_count && required > 0 && seed_ids.len() != required {
            return Err(EngineError::InvalidArgument(format!(
                "exactly {} seed movies are required, got {}",
                required,
                seed_ids.len()
            )));
        }

        let mut seen = HashSet::with_capacity(seed_ids.len());
        if let Some(dup) = seed_ids.iter().find(|id| !seen.insert(**id)) {
            return Err(EngineError::InvalidArgument(format!(
                "seed movie {} appears more than once",
                dup
            )));
        }
        Ok(())
    }

    fn read_catalog(&self) -> EngineResult<RwLockReadGuard<'_, Catalog>> {
        self.catalog
            .read()
            .map_err(|_| EngineError::Internal("catalog lock poisoned".to_string()))
    }

    fn write_catalog(&self) -> EngineResult<RwLockWriteGuard<'_, Catalog>> {
        self.catalog
            .write()
            .map_err(|_| EngineError::Internal("catalog lock poisoned".to_string()))
    }

    fn lock_cache(&self) -> EngineResult<MutexGuard<'_, GraphCache>> {
        self.cache.lock().map_err(|_| {
            warn!("Graph cache lock poisoned");
            EngineError::Internal("graph cache lock poisoned".to_string())
        })
    }
}

fn check_seeds_exist(catalog: &Catalog, seed_ids: &[MovieId]) -> EngineResult<()> {
    let missing: Vec<MovieId> = seed_ids
        .iter()
        .copied()
        .filter(|id| !catalog.contains(*id))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(EngineError::InvalidArgument(format!(
            "unknown seed movie(s): {:?}",
            missing
        )))
    }
}
