//! Filter to keep courses at the selected difficulty levels.

use crate::state::FilterState;
use crate::traits::Filter;
use catalog::Course;

/// Keeps courses whose level is one of the selected levels.
pub struct LevelFilter;

impl Filter for LevelFilter {
    fn name(&self) -> &str {
        "LevelFilter"
    }

    fn is_active(&self, state: &FilterState) -> bool {
        !state.level.is_empty()
    }

    fn matches(&self, course: &Course, state: &FilterState) -> bool {
        state.level.contains(&course.level)
    }
}
