//! Sort strategies applied after filtering.
//!
//! Both strategies are stable: courses with equal keys keep the order they
//! came out of the filter in.

use crate::state::SortBy;
use catalog::Course;
use std::cmp::Ordering;

/// Return a newly ordered copy of `courses`. The input is left untouched.
pub fn sort<'a>(courses: &[&'a Course], sort_by: SortBy) -> Vec<&'a Course> {
    let mut sorted = courses.to_vec();
    sorted.sort_by(|a, b| compare(a, b, sort_by));
    sorted
}

/// Ordering used by `sort`, descending on the chosen key.
pub fn compare(a: &Course, b: &Course, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::HighestRated => b.rating.total_cmp(&a.rating),
        SortBy::Newest => b.created_at.cmp(&a.created_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ids<'a>(courses: &[&'a Course]) -> Vec<&'a str> {
        courses.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_highest_rated_is_stable() {
        let courses = vec![
            Course::new("a", "A").with_rating(5.0),
            Course::new("b", "B").with_rating(5.0),
            Course::new("c", "C").with_rating(3.0),
        ];
        let input: Vec<&Course> = courses.iter().collect();

        let sorted = sort(&input, SortBy::HighestRated);
        assert_eq!(ids(&sorted), vec!["a", "b", "c"]);

        let reversed: Vec<&Course> = courses.iter().rev().collect();
        let sorted = sort(&reversed, SortBy::HighestRated);
        assert_eq!(ids(&sorted), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_newest_first() {
        let day = |d: u32| Utc.with_ymd_and_hms(2024, 5, d, 0, 0, 0).unwrap();
        let courses = vec![
            Course::new("old", "Old").with_created_at(day(1)),
            Course::new("new", "New").with_created_at(day(20)),
            Course::new("mid", "Mid").with_created_at(day(10)),
            Course::new("mid-too", "Mid too").with_created_at(day(10)),
        ];
        let input: Vec<&Course> = courses.iter().collect();

        let sorted = sort(&input, SortBy::Newest);

        assert_eq!(ids(&sorted), vec!["new", "mid", "mid-too", "old"]);
        assert_eq!(ids(&input), vec!["old", "new", "mid", "mid-too"]);
    }

    #[test]
    fn test_sort_empty() {
        assert!(sort(&[], SortBy::Newest).is_empty());
    }
}
