//! Integration tests for the pipeline.
//!
//! These tests verify that filters, sorting and pagination work together
//! over a realistic catalog.

use catalog::{Catalog, Course, Level};
use chrono::{Duration, TimeZone, Utc};
use discovery::filters::*;
use discovery::{
    filter, paginate, sort, DurationBucket, FilterPipeline, FilterState, Pagination, PriceTier,
    SortBy,
};
use std::collections::HashSet;
use std::num::NonZeroUsize;

/// 25 courses: 10 in Development with ratings 3.0 to 5.0, the rest spread
/// over three other categories.
fn create_test_catalog() -> Catalog {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut courses = Vec::new();

    let dev_ratings = [3.0, 3.4, 3.9, 4.0, 4.2, 4.4, 4.5, 4.7, 4.9, 5.0];
    for (i, rating) in dev_ratings.iter().enumerate() {
        courses.push(
            Course::new(format!("dev-{i}"), format!("Development Course {i}"))
                .with_category("Development")
                .with_rating(*rating)
                .with_duration(i as f64 * 2.0)
                .with_level(if i % 2 == 0 { Level::Beginner } else { Level::Expert })
                .with_price(if i % 3 == 0 { 0.0 } else { 49.0 })
                .with_created_at(base + Duration::days(i as i64)),
        );
    }

    let others = ["Business", "Design", "Marketing"];
    for i in 0..15 {
        courses.push(
            Course::new(format!("other-{i}"), format!("Other Course {i}"))
                .with_category(others[i % 3])
                .with_rating(4.6)
                .with_duration(1.5)
                .with_level(Level::AllLevels)
                .with_price(25.0)
                .with_languages(if i % 2 == 0 { vec!["English"] } else { vec!["Spanish", "English"] })
                .with_created_at(base + Duration::days(30 + i as i64)),
        );
    }

    Catalog::from_courses(courses)
}

fn ids<'a>(courses: &[&'a Course]) -> Vec<&'a str> {
    courses.iter().map(|c| c.id.as_str()).collect()
}

#[test]
fn test_end_to_end_development_by_rating() {
    let catalog = create_test_catalog();
    let state = FilterState::new()
        .with_category("Development")
        .with_rating(4.0)
        .with_sort(SortBy::HighestRated);
    let cursor = Pagination::new(NonZeroUsize::new(20).unwrap());

    let page = FilterPipeline::standard().run(catalog.courses().iter().collect(), &state, &cursor);

    assert_eq!(page.total_pages, 1);
    assert_eq!(page.page, 1);
    assert_eq!(
        ids(&page.items),
        vec!["dev-9", "dev-8", "dev-7", "dev-6", "dev-5", "dev-4", "dev-3"]
    );
    for pair in page.items.windows(2) {
        assert!(pair[0].rating >= pair[1].rating);
    }
    assert!(page.items.iter().all(|c| c.category == "Development" && c.rating >= 4.0));
}

#[test]
fn test_filter_is_deterministic() {
    let catalog = create_test_catalog();
    let state = FilterState::new()
        .with_level(Level::Beginner)
        .with_price(PriceTier::Paid)
        .with_duration(DurationBucket::SixToSeventeenHours);

    let first = filter(catalog.courses(), &state);
    let second = filter(catalog.courses(), &state);

    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn test_and_across_dimensions_or_within() {
    let catalog = create_test_catalog();
    let by_category = FilterState::new()
        .with_category("Business")
        .with_category("Design");

    let filtered = filter(catalog.courses(), &by_category);
    assert_eq!(filtered.len(), 10);
    assert!(filtered
        .iter()
        .all(|c| c.category == "Business" || c.category == "Design"));

    let narrowed = by_category.with_language("Spanish");
    let filtered = filter(catalog.courses(), &narrowed);
    assert!(!filtered.is_empty());
    assert!(filtered.iter().all(|c| {
        (c.category == "Business" || c.category == "Design")
            && c.language.iter().any(|l| l == "Spanish")
    }));
}

#[test]
fn test_default_state_keeps_every_course() {
    let catalog = create_test_catalog();
    let filtered = filter(catalog.courses(), &FilterState::default());

    let all: HashSet<&str> = catalog.courses().iter().map(|c| c.id.as_str()).collect();
    let kept: HashSet<&str> = filtered.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(all, kept);
}

#[test]
fn test_custom_pipeline_ignores_missing_dimensions() {
    let catalog = create_test_catalog();
    let pipeline = FilterPipeline::new()
        .add_filter(CategoryFilter)
        .add_filter(MinimumRatingFilter);
    let state = FilterState::new()
        .with_category("Marketing")
        .with_level(Level::Expert);

    let filtered = pipeline.apply(catalog.courses().iter().collect(), &state);

    assert_eq!(filtered.len(), 5);
}

#[test]
fn test_newest_sort_then_paging() {
    let catalog = create_test_catalog();
    let filtered = filter(catalog.courses(), &FilterState::default());
    let sorted = sort(&filtered, SortBy::Newest);

    let page = paginate(&sorted, NonZeroUsize::new(9).unwrap(), 1);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items[0].id.as_str(), "other-14");

    let last = paginate(&sorted, NonZeroUsize::new(9).unwrap(), 3);
    assert_eq!(last.items.len(), 7);
    assert_eq!(last.items.last().unwrap().id.as_str(), "dev-0");
}

#[test]
fn test_no_matches_is_a_single_empty_page() {
    let catalog = create_test_catalog();
    let state = FilterState::new().with_category("Photography");
    let cursor = Pagination::new(NonZeroUsize::new(20).unwrap());

    let page = FilterPipeline::standard().run(catalog.courses().iter().collect(), &state, &cursor);

    assert!(page.is_empty());
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.total_items, 0);
}
