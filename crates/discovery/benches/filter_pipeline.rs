//! Benchmarks for the filter, sort and paginate pipeline
//!
//! Run with: cargo bench --package discovery
//!
//! Uses a synthetic catalog of a few thousand courses, the upper end of what
//! a session holds in memory.

use catalog::{Catalog, Course, Level};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use discovery::{DurationBucket, FilterPipeline, FilterState, Pagination, SortBy};
use std::num::NonZeroUsize;

const CATEGORIES: [&str; 6] = ["Development", "Business", "IT & Software", "Design", "Marketing", "Photography"];

fn build_catalog(count: usize) -> Catalog {
    let courses = (0..count).map(|i| {
        Course::new(format!("bench-{i}"), format!("Benchmark Course {i}"))
            .with_category(CATEGORIES[i % CATEGORIES.len()])
            .with_rating((i % 50) as f64 / 10.0)
            .with_duration((i % 40) as f64 * 0.5)
            .with_level(Level::ALL[i % Level::ALL.len()])
            .with_price(if i % 4 == 0 { 0.0 } else { 19.99 })
    });
    Catalog::from_courses(courses)
}

fn bench_unconstrained(c: &mut Criterion) {
    let catalog = build_catalog(2_000);
    let pipeline = FilterPipeline::standard();
    let state = FilterState::default();
    let cursor = Pagination::new(NonZeroUsize::new(20).unwrap());

    c.bench_function("pipeline_unconstrained", |b| {
        b.iter(|| {
            let page = pipeline.run(catalog.courses().iter().collect(), black_box(&state), &cursor);
            black_box(page.total_pages)
        })
    });
}

fn bench_all_dimensions(c: &mut Criterion) {
    let catalog = build_catalog(2_000);
    let pipeline = FilterPipeline::standard();
    let state = FilterState::new()
        .with_rating(3.0)
        .with_duration(DurationBucket::ThreeToSixHours)
        .with_duration(DurationBucket::SixToSeventeenHours)
        .with_category("Development")
        .with_category("Design")
        .with_level(Level::Beginner)
        .with_level(Level::Intermediate)
        .with_language("English")
        .with_sort(SortBy::HighestRated);
    let cursor = Pagination::new(NonZeroUsize::new(9).unwrap());

    c.bench_function("pipeline_all_dimensions", |b| {
        b.iter(|| {
            let page = pipeline.run(catalog.courses().iter().collect(), black_box(&state), &cursor);
            black_box(page.total_items)
        })
    });
}

criterion_group!(benches, bench_unconstrained, bench_all_dimensions);
criterion_main!(benches);
