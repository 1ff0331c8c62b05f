use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{Catalog, Movie, MovieId};
use ranking::{ExplanationReport, StrategyKind};
use server::{
    EngineConfig, ExplainRequest, MovieRecommendation, RecommendRequest, RecommendationService,
};
use similarity::GraphKind;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::debug;

/// CineGraph - content-based movie recommendations
#[derive(Parser)]
#[command(name = "cinegraph")]
#[command(about = "Movie recommendations from a similarity graph of director, cast, genres and tags", long_about = None)]
struct Cli {
    /// Catalog export (.json or .dat); overrides CINEGRAPH_CATALOG_PATH
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Ranking strategy: additive or shortest-path
    #[arg(long)]
    strategy: Option<StrategyKind>,

    /// Exact number of seeds each request must carry (0 accepts any count)
    #[arg(long)]
    required_seeds: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a set of seed movies
    Recommend {
        /// Seed movie ids, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        seeds: Vec<MovieId>,

        /// Number of recommendations to return
        #[arg(long)]
        k: Option<usize>,

        /// Show the per-seed breakdown for each recommendation
        #[arg(long)]
        explain: bool,
    },

    /// Explain how a movie relates to a set of seed movies
    Explain {
        /// Seed movie ids, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        seeds: Vec<MovieId>,

        /// Movie to explain
        #[arg(long)]
        target: MovieId,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Build the graph for the current catalog and show its size
    Graph {
        /// Show the distance graph instead of the similarity graph
        #[arg(long)]
        distance: bool,
    },

    /// Run benchmark with random seed sets
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;

    println!("Loading catalog from {}...", config.catalog_path.display());
    let start = Instant::now();
    let catalog = Catalog::load_from_file(&config.catalog_path)
        .with_context(|| format!("Failed to load catalog {}", config.catalog_path.display()))?;
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );

    let service = RecommendationService::new(catalog, config)
        .context("Failed to start recommendation service")?;

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend { seeds, k, explain } => {
            handle_recommend(&service, seeds, k, explain).await?
        }
        Commands::Explain { seeds, target } => handle_explain(&service, &seeds, target).await?,
        Commands::Search { title } => handle_search(&service, &title)?,
        Commands::Graph { distance } => handle_graph(&service, distance).await?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(&service, requests, concurrent).await?,
    }

    Ok(())
}

/// Environment configuration with command-line overrides applied
fn build_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = EngineConfig::from_env()?;
    if let Some(path) = &cli.catalog {
        config = config.with_catalog_path(path);
    }
    if let Some(strategy) = cli.strategy {
        config = config.with_strategy(strategy);
    }
    if let Some(count) = cli.required_seeds {
        config = config.with_required_seed_count(count);
    }
    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Handle the 'recommend' command
async fn handle_recommend(
    service: &RecommendationService,
    seeds: Vec<MovieId>,
    k: Option<usize>,
    explain: bool,
) -> Result<()> {
    let mut request = RecommendRequest::new(seeds.clone());
    if let Some(k) = k {
        request = request.with_k(k);
    }
    let response = service.recommend(request).await?;

    println!("{}", "Seed movies:".bold().blue());
    for id in &seeds {
        if let Some(movie) = service.movie(*id)? {
            println!("  {} {}", "•".green(), describe_movie(&movie));
        }
    }

    print_recommendations(&response.recommendations, response.strategy);

    if explain {
        for rec in &response.recommendations {
            let report = service
                .explain(ExplainRequest::new(&seeds, rec.movie.id))
                .await?;
            println!();
            print_report(&rec.movie.title, &report);
        }
    }
    Ok(())
}

/// Handle the 'explain' command
async fn handle_explain(
    service: &RecommendationService,
    seeds: &[MovieId],
    target: MovieId,
) -> Result<()> {
    let report = service.explain(ExplainRequest::new(seeds, target)).await?;
    let title = service
        .movie(target)?
        .map(|m| m.title)
        .ok_or_else(|| anyhow!("Movie {} not found", target))?;
    print_report(&title, &report);
    Ok(())
}

/// Handle the 'search' command
fn handle_search(service: &RecommendationService, title: &str) -> Result<()> {
    let matches = service.search_by_title(title)?;

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  (no matches)");
    }
    for movie in matches.iter().take(20) {
        println!("{}: {}", movie.id.to_string().green(), describe_movie(movie));
    }
    Ok(())
}

/// Handle the 'graph' command
async fn handle_graph(service: &RecommendationService, distance: bool) -> Result<()> {
    let kind = if distance {
        GraphKind::Distance
    } else {
        GraphKind::Similarity
    };

    let start = Instant::now();
    let stats = service.graph_stats(kind).await?;
    let threshold = service.config().threshold_for(kind);

    println!("{}", format!("{:?} graph", kind).bold().blue());
    println!("{}Catalog revision: {}", "• ".cyan(), stats.revision);
    println!("{}Nodes: {}", "• ".cyan(), stats.node_count);
    println!("{}Edges: {}", "• ".cyan(), stats.edge_count);
    println!("{}Edge threshold: {}", "• ".cyan(), threshold);
    if stats.node_count > 0 {
        let avg_degree = 2.0 * stats.edge_count as f32 / stats.node_count as f32;
        println!("{}Average degree: {:.2}", "• ".cyan(), avg_degree);
    }
    println!("{}Built in {:?}", "• ".cyan(), start.elapsed());
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    service: &RecommendationService,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    let seed_count = match service.config().required_seed_count {
        0 => 4,
        n => n,
    };
    let catalog_ids = service.movie_ids()?;
    if catalog_ids.len() < seed_count {
        return Err(anyhow!(
            "Catalog has {} movies, need at least {} for a seed set",
            catalog_ids.len(),
            seed_count
        ));
    }

    // Warm the graph cache so the first requests don't pay for the build
    service.graph_stats(service.config().strategy.build().graph_kind()).await?;

    // Random seed sets, each without repeated ids
    let seed_sets: Vec<Vec<MovieId>> = {
        let mut rng = rand::rng();
        (0..requests)
            .map(|_| {
                rand::seq::index::sample(&mut rng, catalog_ids.len(), seed_count)
                    .into_iter()
                    .map(|i| catalog_ids[i])
                    .collect()
            })
            .collect()
    };

    let wall_clock = Instant::now();
    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    for batch in seed_sets.chunks(concurrent.max(1)) {
        let mut handles = vec![];
        for seeds in batch {
            let service = service.clone();
            let seeds = seeds.clone();
            let handle = tokio::spawn(async move {
                let start = Instant::now();
                service.recommend(RecommendRequest::new(seeds)).await?;
                Ok::<_, anyhow::Error>(start.elapsed())
            });
            handles.push(handle);
        }
        for handle in handles {
            timings.push(handle.await??);
        }
    }
    let total_time = wall_clock.elapsed();

    if timings.is_empty() {
        println!("No requests made");
        return Ok(());
    }

    let latency_sum: Duration = timings.iter().sum();
    let avg_latency = latency_sum / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f32| {
        let idx = ((timings.len() as f32 * p) as usize).min(timings.len() - 1);
        timings[idx]
    };
    let throughput = timings.len() as f32 / total_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", timings.len(), concurrent.max(1));
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

fn describe_movie(movie: &Movie) -> String {
    let year = movie
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "????".to_string());
    let genres = movie.genres.iter().collect::<Vec<_>>().join(", ");
    let director = movie.director.as_deref().unwrap_or("unknown director");
    format!("{} ({}) [{}] - {}", movie.title, year, genres, director)
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[MovieRecommendation], strategy: StrategyKind) {
    let label = match strategy {
        StrategyKind::Additive => "similarity",
        StrategyKind::ShortestPath => "distance",
    };
    println!(
        "{}",
        format!("Recommendations ({}):", strategy).bold().blue()
    );
    if recommendations.is_empty() {
        println!("  (no connected movies)");
    }
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} - {}: {:.3}",
            (i + 1).to_string().green(),
            describe_movie(&rec.movie),
            label,
            rec.score
        );
    }
}

fn print_report(title: &str, report: &ExplanationReport) {
    println!(
        "{} {} (total {:.2})",
        "Why".bold().blue(),
        title.bold(),
        report.total_score
    );
    if report.matches.is_empty() {
        println!("  shares nothing with the seeds");
    }
    for m in &report.matches {
        println!(
            "  {} {} [+{:.2}]: {}",
            "•".green(),
            m.connected_with,
            m.score_contributed,
            m.details
        );
    }
}
