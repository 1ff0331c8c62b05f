//! Simple test harness for the recommendation service.
//!
//! Loads the configured catalog, asks for recommendations for the first
//! movies in it and prints the JSON responses.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use data_loader::Catalog;
use server::{EngineConfig, ExplainRequest, RecommendRequest, RecommendationService};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,server=debug,ranking=debug")),
        )
        .init();

    info!("Starting CineGraph service test harness");

    let config = EngineConfig::from_env()?;
    info!("Loading catalog from {}", config.catalog_path.display());
    let catalog = Catalog::load_from_file(&config.catalog_path)
        .with_context(|| format!("Failed to load catalog {}", config.catalog_path.display()))?;

    let seed_count = config.required_seed_count.max(1);
    let seed_ids: Vec<_> = catalog.all_movie_ids().into_iter().take(seed_count).collect();
    let service = RecommendationService::new(catalog, config)?;

    info!("Requesting recommendations for seeds {:?}", seed_ids);
    let response = service
        .recommend(RecommendRequest::new(seed_ids.clone()))
        .await
        .context("Recommendation failed")?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if let Some(top) = response.recommendations.first() {
        let report = service
            .explain(ExplainRequest::new(&seed_ids, top.movie.id))
            .await
            .context("Explanation failed")?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
