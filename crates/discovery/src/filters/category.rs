//! Filter to keep courses in the selected categories.
//!
//! Category names are compared case-insensitively so "IT & Software" from a
//! checkbox matches "it & software" from a hand-edited row.

use crate::state::FilterState;
use crate::traits::Filter;
use catalog::Course;

/// Keeps courses whose category is one of the selected categories.
pub struct CategoryFilter;

impl Filter for CategoryFilter {
    fn name(&self) -> &str {
        "CategoryFilter"
    }

    fn is_active(&self, state: &FilterState) -> bool {
        !state.category.is_empty()
    }

    fn matches(&self, course: &Course, state: &FilterState) -> bool {
        state
            .category
            .iter()
            .any(|category| category.eq_ignore_ascii_case(&course.category))
    }
}
