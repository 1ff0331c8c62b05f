//! Benchmarks for graph construction
//!
//! Run with: cargo bench --package similarity
//!
//! Uses a synthetic catalog so the numbers don't depend on a local export.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use data_loader::Movie;
use similarity::{GraphBuilder, DEFAULT_MAX_EDGE_DISTANCE, DEFAULT_MIN_EDGE_WEIGHT};

const GENRES: [&str; 6] = ["Action", "Drama", "Comedy", "Thriller", "Romance", "War"];
const DIRECTORS: [&str; 8] = ["A", "B", "C", "D", "E", "F", "G", "H"];

fn synthetic_catalog(size: u32) -> Vec<Movie> {
    (1..=size)
        .map(|i| {
            let g1 = GENRES[i as usize % GENRES.len()];
            let g2 = GENRES[(i as usize / 3) % GENRES.len()];
            Movie::new(i, format!("Movie {}", i))
                .with_director(DIRECTORS[i as usize % DIRECTORS.len()])
                .with_genres(&format!("{},{}", g1, g2))
                .with_cast(&format!("actor{}, actor{}", i % 40, (i * 7) % 40))
                .with_tags(&format!("tag{}, tag{}, tag{}", i % 25, (i * 3) % 25, (i * 11) % 25))
                .with_year(1960 + (i % 60) as u16)
                .with_rating(4.0 + (i % 60) as f32 / 10.0)
        })
        .collect()
}

fn bench_similarity_graph(c: &mut Criterion) {
    let builder = GraphBuilder::new();
    let mut group = c.benchmark_group("similarity_graph");

    for size in [100u32, 500, 1000] {
        let movies = synthetic_catalog(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &movies, |b, movies| {
            b.iter(|| {
                let graph = builder
                    .build(black_box(movies), DEFAULT_MIN_EDGE_WEIGHT)
                    .expect("build failed");
                black_box(graph)
            })
        });
    }
    group.finish();
}

fn bench_distance_graph(c: &mut Criterion) {
    let builder = GraphBuilder::new();
    let movies = synthetic_catalog(500);

    c.bench_function("distance_graph_500", |b| {
        b.iter(|| {
            let graph = builder
                .build_distance(black_box(&movies), DEFAULT_MAX_EDGE_DISTANCE)
                .expect("build failed");
            black_box(graph)
        })
    });
}

criterion_group!(benches, bench_similarity_graph, bench_distance_graph);
criterion_main!(benches);
