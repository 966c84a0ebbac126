//! Filter to keep courses taught in a selected language.

use crate::state::FilterState;
use crate::traits::Filter;
use catalog::Course;

/// Keeps courses with at least one language tag in the selected set.
///
/// Every tag counts, not just the primary language, and tags compare
/// case-insensitively.
pub struct LanguageFilter;

impl Filter for LanguageFilter {
    fn name(&self) -> &str {
        "LanguageFilter"
    }

    fn is_active(&self, state: &FilterState) -> bool {
        !state.language.is_empty()
    }

    fn matches(&self, course: &Course, state: &FilterState) -> bool {
        course.language.iter().any(|tag| {
            state
                .language
                .iter()
                .any(|selected| selected.eq_ignore_ascii_case(tag))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secondary_language_matches() {
        let courses = vec![
            Course::new("en", "English only"),
            Course::new("it-en", "Italian first").with_languages(["Italian", "English"]),
            Course::new("fr", "French only").with_languages(["French"]),
        ];
        let state = FilterState::new().with_language("english");

        let filtered = LanguageFilter.apply(courses.iter().collect(), &state);

        let ids: Vec<&str> = filtered.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["en", "it-en"]);
    }
}
