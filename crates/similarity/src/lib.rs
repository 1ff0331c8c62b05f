//! # Similarity Crate
//!
//! Content-based similarity between catalog movies.
//!
//! ## Components
//!
//! ### Attribute functions
//! Normalized [0, 1] scores for one dimension each: Jaccard overlap for
//! genres/cast/tags, exact equality for the director, bounded difference for
//! year and rating.
//!
//! ### Weights
//! - `SimilarityWeights`: director 0.3, tags 0.4, genres 0.2, cast 0.2, plus
//!   flat +0.05 bonuses for close years (≤ 5) and ratings (≤ 1.0)
//! - `DistanceWeights`: normalized similarity inverted into a distance for
//!   shortest-path ranking
//!
//! ### Graph building
//! `GraphBuilder` scores every pair of movies in parallel and keeps the
//! edges that pass the threshold. `GraphCache` owns built graphs and throws
//! them away when the catalog revision moves.
//!
//! ## Example Usage
//!
//! ```ignore
//! use similarity::{GraphBuilder, DEFAULT_MIN_EDGE_WEIGHT};
//!
//! let movies = catalog.snapshot();
//! let graph = GraphBuilder::new().build(&movies, DEFAULT_MIN_EDGE_WEIGHT)?;
//! for (neighbor, weight) in graph.neighbors(1) {
//!     println!("{} -> {} ({:.2})", 1, neighbor, weight);
//! }
//! ```

pub mod attributes;
pub mod builder;
pub mod cache;
pub mod error;
pub mod graph;
pub mod weights;

pub use attributes::{bounded_difference, equality_score, set_overlap};
pub use builder::{GraphBuilder, DEFAULT_MAX_EDGE_DISTANCE, DEFAULT_MIN_EDGE_WEIGHT};
pub use cache::GraphCache;
pub use error::GraphError;
pub use graph::{GraphKind, SimilarityGraph};
pub use weights::{Dimension, DistanceWeights, SimilarityWeights, WeightedTerm};
