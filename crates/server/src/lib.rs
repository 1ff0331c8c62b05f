//! Server crate for the CineGraph recommendation engine.
//!
//! This crate contains the service that ties the catalog, graph cache and
//! ranking strategy together behind the recommend/explain contract.

pub mod api;
pub mod config;
pub mod service;

pub use api::{
    ExplainRequest, ExplainResponse, GraphStats, MovieRecommendation, MovieRef, RecommendRequest,
    RecommendResponse,
};
pub use config::EngineConfig;
pub use service::RecommendationService;
