//! Filter to enforce the minimum rating threshold.

use crate::state::FilterState;
use crate::traits::Filter;
use catalog::Course;

/// Keeps courses rated at or above `state.rating`.
///
/// A threshold of 0 disables the filter.
pub struct MinimumRatingFilter;

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn is_active(&self, state: &FilterState) -> bool {
        state.rating > 0.0
    }

    fn matches(&self, course: &Course, state: &FilterState) -> bool {
        course.rating >= state.rating
    }
}
