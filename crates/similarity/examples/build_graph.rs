//! Example: Build the similarity graph for a catalog export
//!
//! Run with: cargo run --package similarity --example build_graph -- data/movies.json
//!
//! This example shows how to:
//! 1. Load a catalog export
//! 2. Build the additive similarity graph
//! 3. Inspect the best-connected movies and their strongest neighbors

use data_loader::Catalog;
use similarity::{GraphBuilder, DEFAULT_MIN_EDGE_WEIGHT};
use std::path::PathBuf;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/movies.json"));

    println!("Loading catalog from {}...", path.display());
    let catalog = Catalog::load_from_file(&path)?;
    let movies = catalog.snapshot();

    let start = Instant::now();
    let graph = GraphBuilder::new().build(&movies, DEFAULT_MIN_EDGE_WEIGHT)?;
    println!(
        "Built graph with {} nodes and {} edges in {:?}\n",
        graph.node_count(),
        graph.edge_count(),
        start.elapsed()
    );

    let mut by_degree: Vec<_> = graph.nodes().into_iter().map(|id| (id, graph.degree(id))).collect();
    by_degree.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    println!("Top 5 best-connected movies:");
    for (id, degree) in by_degree.iter().take(5) {
        let Some(movie) = catalog.get_movie(*id) else { continue };
        println!("  {} ({} neighbors)", movie.title, degree);

        let mut neighbors: Vec<_> = graph.neighbors(*id).collect();
        neighbors.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        for (neighbor, weight) in neighbors.iter().take(3) {
            if let Some(other) = catalog.get_movie(*neighbor) {
                println!("     -> {} [{:.3}]", other.title, weight);
            }
        }
    }

    Ok(())
}
