//! Core traits for the filtering pipeline.
//!
//! Each filter dimension (rating, duration, level, ...) is one `Filter`.
//! The pipeline runs the active ones in sequence, which ANDs them together.

use crate::state::FilterState;
use catalog::Course;

/// One filterable dimension of a course.
///
/// ## Design Note
/// - `Send + Sync` lets one pipeline be shared by every session
/// - Filters read their parameters from the `FilterState` on each call, so a
///   filter holds no state between recomputations
/// - Courses are borrowed from the shared catalog; filtering never clones them
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether this dimension constrains anything under `state`.
    ///
    /// An inactive filter passes every course through untouched.
    fn is_active(&self, state: &FilterState) -> bool;

    /// Whether a single course satisfies this dimension.
    ///
    /// Only called while the filter is active.
    fn matches(&self, course: &Course, state: &FilterState) -> bool;

    /// Apply this filter to a set of courses, preserving their order.
    fn apply<'a>(&self, courses: Vec<&'a Course>, state: &FilterState) -> Vec<&'a Course> {
        if !self.is_active(state) {
            return courses;
        }
        courses
            .into_iter()
            .filter(|course| self.matches(course, state))
            .collect()
    }
}
