//! Filter to split free and paid courses.

use crate::state::{FilterState, PriceTier};
use crate::traits::Filter;
use catalog::Course;

/// Keeps courses in any selected price tier.
///
/// Selecting both tiers is the same as selecting neither.
pub struct PriceFilter;

impl Filter for PriceFilter {
    fn name(&self) -> &str {
        "PriceFilter"
    }

    fn is_active(&self, state: &FilterState) -> bool {
        !state.price.is_empty()
            && !(state.price.contains(&PriceTier::Free) && state.price.contains(&PriceTier::Paid))
    }

    fn matches(&self, course: &Course, state: &FilterState) -> bool {
        state.price.iter().any(|tier| tier.contains(course.price))
    }
}
