//! Integration tests for ranking.
//!
//! These tests build real graphs from small catalogs and check that both
//! strategies and the explanation reporter behave end to end.

use data_loader::{Movie, MovieId};
use ranking::{
    recommend, AdditiveNeighborStrategy, EngineError, ExplanationReporter, RankingStrategy,
    ShortestPathStrategy, StrategyKind,
};
use similarity::{GraphBuilder, DEFAULT_MAX_EDGE_DISTANCE, DEFAULT_MIN_EDGE_WEIGHT};

fn scenario_catalog() -> Vec<Movie> {
    vec![
        Movie::new(1, "One").with_director("X").with_genres("Action,Drama"),
        Movie::new(2, "Two").with_director("X").with_genres("Action"),
        Movie::new(3, "Three").with_director("Y").with_genres("Comedy"),
    ]
}

fn create_test_catalog() -> Vec<Movie> {
    vec![
        Movie::new(1, "Top Gun")
            .with_director("Tony Scott")
            .with_genres("Action,Drama")
            .with_cast("Tom Cruise, Kelly McGillis, Val Kilmer")
            .with_tags("aviation,navy,rivalry")
            .with_year(1986)
            .with_rating(6.9),
        Movie::new(2, "Days of Thunder")
            .with_director("Tony Scott")
            .with_genres("Action,Drama,Sport")
            .with_cast("Tom Cruise, Nicole Kidman, Robert Duvall")
            .with_tags("racing,rivalry")
            .with_year(1990)
            .with_rating(6.1),
        Movie::new(3, "Dunkirk")
            .with_director("Christopher Nolan")
            .with_genres("Action,Drama,War")
            .with_cast("Fionn Whitehead, Tom Hardy")
            .with_tags("war,aviation,evacuation")
            .with_year(2017)
            .with_rating(7.8),
        Movie::new(4, "Inception")
            .with_director("Christopher Nolan")
            .with_genres("Action,Sci-Fi")
            .with_cast("Leonardo DiCaprio, Tom Hardy")
            .with_tags("dreams,heist")
            .with_year(2010)
            .with_rating(8.8),
        Movie::new(5, "Crimson Tide")
            .with_director("Tony Scott")
            .with_genres("Action,Thriller")
            .with_cast("Denzel Washington, Gene Hackman")
            .with_tags("navy,submarine")
            .with_year(1995)
            .with_rating(7.3),
        Movie::new(6, "Amelie")
            .with_director("Jean-Pierre Jeunet")
            .with_genres("Comedy,Romance")
            .with_cast("Audrey Tautou")
            .with_tags("paris,whimsy")
            .with_year(2001)
            .with_rating(8.3),
        Movie::new(7, "Tenet")
            .with_director("Christopher Nolan")
            .with_genres("Action,Sci-Fi,Thriller")
            .with_cast("John David Washington, Robert Pattinson")
            .with_tags("time,heist")
            .with_year(2020)
            .with_rating(7.3),
    ]
}

fn pick(movies: &[Movie], wanted: &[MovieId]) -> Vec<Movie> {
    movies
        .iter()
        .filter(|m| wanted.contains(&m.id))
        .cloned()
        .collect()
}

#[test]
fn test_scenario_graph_and_recommendation() {
    let graph = GraphBuilder::new()
        .build(&scenario_catalog(), DEFAULT_MIN_EDGE_WEIGHT)
        .unwrap();

    let weight = graph.weight(1, 2).unwrap();
    assert!((weight - 0.4).abs() < 1e-5);
    assert!(!graph.has_edge(1, 3));
    assert!(!graph.has_edge(2, 3));

    // Only 2 is connected to 1; 3 is never backfilled
    assert_eq!(recommend(&graph, &[1], 4).unwrap(), vec![2]);
}

#[test]
fn test_scenario_tag_explanation() {
    let seed = Movie::new(1, "Seed")
        .with_director("A")
        .with_tags("war,aviation");
    let target = Movie::new(2, "Target")
        .with_director("B")
        .with_tags("war,rivalry");

    let report = ExplanationReporter::default().explain(&[seed], &target);

    assert!((report.total_score - 0.4 / 3.0).abs() < 1e-4);
    assert_eq!(report.matches.len(), 1);
}

#[test]
fn test_empty_seed_list_is_an_error() {
    let graph = GraphBuilder::new()
        .build(&create_test_catalog(), DEFAULT_MIN_EDGE_WEIGHT)
        .unwrap();

    let err = recommend(&graph, &[], 4).unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument(_)));
}

#[test]
fn test_results_never_contain_seeds_and_are_bounded() {
    let movies = create_test_catalog();
    let graph = GraphBuilder::new()
        .build(&movies, DEFAULT_MIN_EDGE_WEIGHT)
        .unwrap();

    let seeds = [1, 3];
    for k in 1..=8 {
        let ranked = AdditiveNeighborStrategy.rank(&graph, &seeds, k).unwrap();

        // Every movie connected to a seed is a candidate
        let mut candidates: Vec<MovieId> = seeds
            .iter()
            .flat_map(|&s| graph.neighbors(s).map(|(n, _)| n))
            .filter(|n| !seeds.contains(n))
            .collect();
        candidates.sort_unstable();
        candidates.dedup();

        assert_eq!(ranked.len(), k.min(candidates.len()));
        assert!(ranked.iter().all(|c| !seeds.contains(&c.movie_id)));
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }
}

#[test]
fn test_recommendation_is_idempotent() {
    let movies = create_test_catalog();
    let builder = GraphBuilder::new();

    let first = recommend(&builder.build(&movies, DEFAULT_MIN_EDGE_WEIGHT).unwrap(), &[1, 4], 4)
        .unwrap();
    let second = recommend(&builder.build(&movies, DEFAULT_MIN_EDGE_WEIGHT).unwrap(), &[1, 4], 4)
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_tony_scott_seeds_pull_tony_scott_movies() {
    let movies = create_test_catalog();
    let graph = GraphBuilder::new()
        .build(&movies, DEFAULT_MIN_EDGE_WEIGHT)
        .unwrap();

    let top = recommend(&graph, &[1, 2], 1).unwrap();
    assert_eq!(top, vec![5]);
}

#[test]
fn test_shortest_path_over_distance_graph() {
    let movies = create_test_catalog();
    let graph = GraphBuilder::new()
        .build_distance(&movies, DEFAULT_MAX_EDGE_DISTANCE)
        .unwrap();

    let ranked = ShortestPathStrategy.rank(&graph, &[3, 4], 4).unwrap();

    assert_eq!(ranked.len(), 4);
    assert!(ranked.iter().all(|c| c.movie_id != 3 && c.movie_id != 4));
    assert!(ranked.windows(2).all(|w| w[0].score <= w[1].score));
    // Tenet shares a director and genres with both Nolan seeds
    assert_eq!(ranked[0].movie_id, 7);
}

#[test]
fn test_strategy_kind_matches_builder_graph() {
    let movies = create_test_catalog();
    let builder = GraphBuilder::new();

    for kind in [StrategyKind::Additive, StrategyKind::ShortestPath] {
        let strategy = kind.build();
        let threshold = match kind {
            StrategyKind::Additive => DEFAULT_MIN_EDGE_WEIGHT,
            StrategyKind::ShortestPath => DEFAULT_MAX_EDGE_DISTANCE,
        };
        let graph = builder
            .build_kind(strategy.graph_kind(), &movies, threshold)
            .unwrap();

        let ranked = strategy.rank(&graph, &[1, 5], 2).unwrap();
        assert_eq!(ranked.len(), 2, "{} returned too few", strategy.name());
    }
}

#[test]
fn test_explanation_against_catalog_movies() {
    let movies = create_test_catalog();
    let seeds = pick(&movies, &[1, 6]);
    let target = movies.iter().find(|m| m.id == 2).unwrap();

    let report = ExplanationReporter::default().explain(&seeds, target);

    // Amelie shares nothing with Days of Thunder
    assert_eq!(report.matches.len(), 1);
    let m = &report.matches[0];
    assert_eq!(m.connected_with, "Top Gun");
    assert!(m.details.starts_with("Same director (Tony Scott) [+0.30]"));
    assert!(report.total_score > 0.3);
}
