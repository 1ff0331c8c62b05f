//! Ranking strategy implementations.
//!
//! Only one strategy is active per service; `StrategyKind` is the
//! configuration switch that picks it.

pub mod additive;
pub mod shortest_path;

pub use additive::AdditiveNeighborStrategy;
pub use shortest_path::ShortestPathStrategy;

use crate::traits::RankingStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Selectable ranking strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Sum of similarity edge weights from each seed (higher is better)
    #[default]
    Additive,
    /// Sum of shortest-path distances from each seed (lower is better)
    ShortestPath,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Additive => "additive",
            StrategyKind::ShortestPath => "shortest-path",
        }
    }

    /// Instantiate the strategy
    pub fn build(self) -> Arc<dyn RankingStrategy> {
        match self {
            StrategyKind::Additive => Arc::new(AdditiveNeighborStrategy),
            StrategyKind::ShortestPath => Arc::new(ShortestPathStrategy),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "additive" => Ok(StrategyKind::Additive),
            "shortest-path" | "shortest_path" | "dijkstra" => Ok(StrategyKind::ShortestPath),
            other => Err(format!(
                "unknown ranking strategy '{}' (expected 'additive' or 'shortest-path')",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similarity::GraphKind;

    #[test]
    fn test_parse_strategy_kind() {
        assert_eq!("additive".parse::<StrategyKind>(), Ok(StrategyKind::Additive));
        assert_eq!(
            "Shortest-Path".parse::<StrategyKind>(),
            Ok(StrategyKind::ShortestPath)
        );
        assert!("diverse".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn test_built_strategy_reads_matching_graph() {
        assert_eq!(StrategyKind::Additive.build().graph_kind(), GraphKind::Similarity);
        assert_eq!(StrategyKind::ShortestPath.build().graph_kind(), GraphKind::Distance);
    }
}
