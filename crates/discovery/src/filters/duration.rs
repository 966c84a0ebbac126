//! Filter to keep courses whose length falls in a selected bucket.

use crate::state::FilterState;
use crate::traits::Filter;
use catalog::Course;

/// Keeps courses in any of the selected duration buckets.
///
/// ## Algorithm
/// A course passes if at least one selected bucket contains its
/// `duration_hours`. Bucket bounds live on `DurationBucket::contains`.
pub struct DurationFilter;

impl Filter for DurationFilter {
    fn name(&self) -> &str {
        "DurationFilter"
    }

    fn is_active(&self, state: &FilterState) -> bool {
        !state.duration.is_empty()
    }

    fn matches(&self, course: &Course, state: &FilterState) -> bool {
        state
            .duration
            .iter()
            .any(|bucket| bucket.contains(course.duration_hours))
    }
}
