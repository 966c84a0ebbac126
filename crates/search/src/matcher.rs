//! Case-insensitive substring matching over the catalog.
//!
//! Two uses:
//! - `QueryMatcher::suggest` feeds the search box with grouped suggestions
//!   (courses by title, instructors by name, categories by name)
//! - `prefilter` narrows the course list of the search results view by title,
//!   description or instructor before the filter pipeline runs

use catalog::{Catalog, Course, CourseId, Instructor};
use std::sync::Arc;
use tracing::debug;

/// Default number of suggestions per group.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// A course entry in the suggestion list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSuggestion {
    pub id: CourseId,
    pub title: String,
}

/// Suggestions for one query, grouped the way the search box renders them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestions {
    pub courses: Vec<CourseSuggestion>,
    pub instructors: Vec<Instructor>,
    pub categories: Vec<String>,
}

impl Suggestions {
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty() && self.instructors.is_empty() && self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.courses.len() + self.instructors.len() + self.categories.len()
    }
}

/// Matches queries against a shared catalog.
///
/// Lowercased display text is computed once at construction, so each
/// keystroke only pays for the substring scans.
pub struct QueryMatcher {
    catalog: Arc<Catalog>,
    limit: usize,
    course_titles: Vec<String>,
    instructor_names: Vec<String>,
    categories: Vec<(String, String)>,
}

impl QueryMatcher {
    /// Create a new QueryMatcher.
    ///
    /// # Arguments
    /// * `catalog` - Shared, read-only catalog
    /// * `limit` - Maximum suggestions per group
    pub fn new(catalog: Arc<Catalog>, limit: usize) -> Self {
        let course_titles = catalog
            .courses()
            .iter()
            .map(|c| c.title.to_lowercase())
            .collect();
        let instructor_names = catalog
            .instructors()
            .iter()
            .map(|i| i.name.to_lowercase())
            .collect();
        let categories = catalog
            .categories()
            .map(|name| (name.to_lowercase(), name.to_string()))
            .collect();

        Self {
            catalog,
            limit,
            course_titles,
            instructor_names,
            categories,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Grouped suggestions for `query`. A blank query suggests nothing.
    pub fn suggest(&self, query: &str) -> Suggestions {
        let needle = normalize_query(query);
        if needle.is_empty() {
            return Suggestions::default();
        }

        let courses = self
            .catalog
            .courses()
            .iter()
            .zip(&self.course_titles)
            .filter(|(_, title)| title.contains(&needle))
            .take(self.limit)
            .map(|(course, _)| CourseSuggestion {
                id: course.id.clone(),
                title: course.title.clone(),
            })
            .collect();

        let instructors = self
            .catalog
            .instructors()
            .iter()
            .zip(&self.instructor_names)
            .filter(|(_, name)| name.contains(&needle))
            .take(self.limit)
            .map(|(instructor, _)| instructor.clone())
            .collect();

        let categories = self
            .categories
            .iter()
            .filter(|(lower, _)| lower.contains(&needle))
            .take(self.limit)
            .map(|(_, display)| display.clone())
            .collect();

        let suggestions = Suggestions {
            courses,
            instructors,
            categories,
        };
        debug!("Query {:?} matched {} suggestions", query, suggestions.len());
        suggestions
    }
}

fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Whether `course` mentions `query` in its title, description or
/// instructor name. A blank query matches every course.
pub fn matches_query(course: &Course, query: &str) -> bool {
    let needle = normalize_query(query);
    needle.is_empty() || mentions(course, &needle)
}

fn mentions(course: &Course, needle: &str) -> bool {
    course.title.to_lowercase().contains(needle)
        || course.description.to_lowercase().contains(needle)
        || course.instructor.name.to_lowercase().contains(needle)
}

/// Narrow `courses` to those matching `query`, preserving order.
pub fn prefilter<'a>(courses: impl IntoIterator<Item = &'a Course>, query: &str) -> Vec<&'a Course> {
    let needle = normalize_query(query);
    courses
        .into_iter()
        .filter(|course| needle.is_empty() || mentions(course, &needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_catalog() -> Arc<Catalog> {
        Arc::new(Catalog::from_courses(vec![
            Course::new("1", "React for Beginners")
                .with_category("Development")
                .with_instructor("Angela Park", "/a.png"),
            Course::new("2", "Advanced React Patterns")
                .with_category("Development")
                .with_instructor("Marta Kowalski", "/m.png"),
            Course::new("3", "Photography Basics")
                .with_description("Learn to react quickly to changing light")
                .with_category("Photography")
                .with_instructor("Giulia Conti", "/g.png"),
            Course::new("4", "Brand Strategy")
                .with_category("Marketing")
                .with_instructor("Parker Reed", "/p.png"),
        ]))
    }

    #[test]
    fn test_suggest_groups() {
        let matcher = QueryMatcher::new(create_test_catalog(), DEFAULT_SUGGESTION_LIMIT);

        let suggestions = matcher.suggest("REACT");
        let titles: Vec<&str> = suggestions.courses.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["React for Beginners", "Advanced React Patterns"]);
        assert!(suggestions.instructors.is_empty());

        let suggestions = matcher.suggest("park");
        assert!(suggestions.courses.is_empty());
        let names: Vec<&str> = suggestions.instructors.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Angela Park", "Parker Reed"]);

        let suggestions = matcher.suggest("photo");
        assert_eq!(suggestions.categories, vec!["Photography".to_string()]);
        assert_eq!(suggestions.courses.len(), 1);
    }

    #[test]
    fn test_suggest_respects_limit() {
        let matcher = QueryMatcher::new(create_test_catalog(), 1);
        let suggestions = matcher.suggest("react");
        assert_eq!(suggestions.courses.len(), 1);
        assert_eq!(suggestions.courses[0].id.as_str(), "1");
    }

    #[test]
    fn test_blank_query_suggests_nothing() {
        let matcher = QueryMatcher::new(create_test_catalog(), DEFAULT_SUGGESTION_LIMIT);
        assert!(matcher.suggest("   ").is_empty());
    }

    #[test]
    fn test_prefilter_searches_description_and_instructor() {
        let catalog = create_test_catalog();

        let hits = prefilter(catalog.courses(), "react");
        let ids: Vec<&str> = hits.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);

        let hits = prefilter(catalog.courses(), "conti");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "3");

        assert_eq!(prefilter(catalog.courses(), "").len(), 4);
        assert!(matches_query(&catalog.courses()[3], " brand "));
    }
}
