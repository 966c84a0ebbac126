//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! filters together using the builder pattern.

use crate::filters::{
    CategoryFilter, DurationFilter, LanguageFilter, LevelFilter, MinimumRatingFilter, PriceFilter,
};
use crate::paginate::{Page, Pagination};
use crate::sort;
use crate::state::FilterState;
use crate::traits::Filter;
use catalog::Course;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(MinimumRatingFilter)
///     .add_filter(CategoryFilter);
///
/// let visible = pipeline.apply(catalog.courses().iter().collect(), &state);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Pipeline with one filter per `FilterState` dimension.
    pub fn standard() -> Self {
        Self::new()
            .add_filter(MinimumRatingFilter)
            .add_filter(DurationFilter)
            .add_filter(LevelFilter)
            .add_filter(CategoryFilter)
            .add_filter(PriceFilter)
            .add_filter(LanguageFilter)
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply all filters in sequence to the courses.
    ///
    /// ## Algorithm
    /// 1. Start with the input courses
    /// 2. For each filter that is active under `state`:
    ///    a. Log filter name and input count
    ///    b. Apply the filter
    ///    c. Log output count
    /// 3. Return final filtered set, in input order
    ///
    /// Running the filters one after another is the AND of their predicates.
    pub fn apply<'a>(&self, courses: Vec<&'a Course>, state: &FilterState) -> Vec<&'a Course> {
        let mut current = courses;
        for filter in self.filters.iter().filter(|f| f.is_active(state)) {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, state);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }

    /// Filter, sort by `state.sort_by`, and cut out the cursor's page.
    ///
    /// A full recompute from its inputs: nothing is carried over from
    /// previous calls.
    pub fn run<'a>(
        &self,
        courses: Vec<&'a Course>,
        state: &FilterState,
        pagination: &Pagination,
    ) -> Page<'a> {
        let filtered = self.apply(courses, state);
        let sorted = sort::sort(&filtered, state.sort_by);
        pagination.slice(&sorted)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

/// Filter a course slice with the standard pipeline.
pub fn filter<'a>(courses: &'a [Course], state: &FilterState) -> Vec<&'a Course> {
    FilterPipeline::standard().apply(courses.iter().collect(), state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Level;

    fn create_test_courses() -> Vec<Course> {
        vec![
            Course::new("1", "Rust").with_category("Development").with_level(Level::Beginner).with_rating(4.5),
            Course::new("2", "Go").with_category("Development").with_level(Level::Expert).with_rating(4.0),
            Course::new("3", "Pitch").with_category("Business").with_level(Level::Beginner).with_rating(3.0),
            Course::new("4", "Logos").with_category("Design").with_level(Level::Beginner).with_rating(5.0),
        ]
    }

    #[test]
    fn test_empty_pipeline() {
        let courses = create_test_courses();
        let pipeline = FilterPipeline::new();
        let state = FilterState::new().with_rating(5.0);

        let filtered = pipeline.apply(courses.iter().collect(), &state);
        assert_eq!(filtered.len(), 4);
    }

    #[test]
    fn test_single_filter() {
        let courses = create_test_courses();
        let pipeline = FilterPipeline::new().add_filter(MinimumRatingFilter);
        let state = FilterState::new().with_rating(4.5);

        let filtered = pipeline.apply(courses.iter().collect(), &state);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id.as_str(), "1");
        assert_eq!(filtered[1].id.as_str(), "4");
    }

    #[test]
    fn test_and_across_or_within() {
        let courses = create_test_courses();
        let state = FilterState::new()
            .with_category("Development")
            .with_category("Business")
            .with_level(Level::Beginner);

        let filtered = filter(&courses, &state);

        let ids: Vec<&str> = filtered.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_default_state_is_identity() {
        let courses = create_test_courses();
        let filtered = filter(&courses, &FilterState::default());
        let expected: Vec<&Course> = courses.iter().collect();
        assert_eq!(filtered, expected);
    }

    #[test]
    fn test_empty_catalog() {
        let state = FilterState::new().with_category("Development").with_rating(4.0);
        assert!(filter(&[], &state).is_empty());
    }
}
