use data_loader::Catalog;
use std::path::PathBuf;
use std::time::Instant;

fn main() {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/movies.json"));

    println!("Loading catalog from {}...\n", path.display());

    let start = Instant::now();
    let catalog = Catalog::load_from_file(&path).expect("Failed to load catalog");
    let elapsed = start.elapsed();

    let with_tags = catalog
        .snapshot()
        .iter()
        .filter(|m| !m.tags.is_empty())
        .count();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", catalog.len());
    println!("Movies with keyword tags: {}", with_tags);
}
