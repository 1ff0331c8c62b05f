//! Engine configuration loaded from `CINEGRAPH_*` environment variables.
//!
//! An optional `.env` file is read first; anything missing falls back to
//! the defaults below.

use std::path::PathBuf;

use anyhow::anyhow;
use ranking::{EngineError, EngineResult, StrategyKind};
use serde::Deserialize;
use similarity::{GraphKind, DEFAULT_MAX_EDGE_DISTANCE, DEFAULT_MIN_EDGE_WEIGHT};

/// Prefix shared by every configuration variable
pub const ENV_PREFIX: &str = "CINEGRAPH_";

/// Recommendation engine configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EngineConfig {
    /// Catalog export to load (`.json` or `.dat`)
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Ranking strategy (`additive` or `shortest-path`)
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Minimum similarity for an edge in the similarity graph
    #[serde(default = "default_min_edge_weight")]
    pub min_edge_weight: f32,

    /// Maximum distance for an edge in the distance graph
    #[serde(default = "default_max_edge_distance")]
    pub max_edge_distance: f32,

    /// Number of recommendations when a request doesn't say
    #[serde(default = "default_k")]
    pub default_k: usize,

    /// Exact number of seeds a request must carry; 0 accepts any count
    #[serde(default = "default_required_seed_count")]
    pub required_seed_count: usize,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/movies.json")
}

fn default_min_edge_weight() -> f32 {
    DEFAULT_MIN_EDGE_WEIGHT
}

fn default_max_edge_distance() -> f32 {
    DEFAULT_MAX_EDGE_DISTANCE
}

fn default_k() -> usize {
    4
}

fn default_required_seed_count() -> usize {
    4
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            strategy: StrategyKind::default(),
            min_edge_weight: default_min_edge_weight(),
            max_edge_distance: default_max_edge_distance(),
            default_k: default_k(),
            required_seed_count: default_required_seed_count(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::prefixed(ENV_PREFIX)
            .from_env::<EngineConfig>()
            .map_err(|e| anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = path.into();
        self
    }

    pub fn with_required_seed_count(mut self, count: usize) -> Self {
        self.required_seed_count = count;
        self
    }

    pub fn with_default_k(mut self, k: usize) -> Self {
        self.default_k = k;
        self
    }

    /// Edge threshold to build a graph of `kind` with
    pub fn threshold_for(&self, kind: GraphKind) -> f32 {
        match kind {
            GraphKind::Similarity => self.min_edge_weight,
            GraphKind::Distance => self.max_edge_distance,
        }
    }

    /// Reject values the engine can't work with
    pub fn validate(&self) -> EngineResult<()> {
        if !(self.min_edge_weight.is_finite() && self.min_edge_weight >= 0.0) {
            return Err(EngineError::InvalidArgument(format!(
                "min_edge_weight must be a non-negative number, got {}",
                self.min_edge_weight
            )));
        }
        if !(self.max_edge_distance.is_finite() && self.max_edge_distance > 0.0) {
            return Err(EngineError::InvalidArgument(format!(
                "max_edge_distance must be a positive number, got {}",
                self.max_edge_distance
            )));
        }
        if self.default_k == 0 {
            return Err(EngineError::InvalidArgument(
                "default_k must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
