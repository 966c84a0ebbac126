//! Catalog building and indexing logic.
//!
//! Builds the `Catalog` from normalized courses:
//! - Primary index by course id (first occurrence wins)
//! - Category index for grouped lookups
//! - Distinct instructor list for search suggestions

use crate::error::Result;
use crate::normalize;
use crate::types::*;
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

impl Catalog {
    /// Build a catalog from already-normalized courses.
    ///
    /// Courses whose id was already seen are dropped so ids stay unique.
    pub fn from_courses(courses: impl IntoIterator<Item = Course>) -> Self {
        let mut catalog = Catalog::new();
        let mut duplicates = 0usize;
        for course in courses {
            if !catalog.insert_course(course) {
                duplicates += 1;
            }
        }
        if duplicates > 0 {
            warn!("Dropped {} courses with duplicate ids", duplicates);
        }
        catalog
    }

    /// Normalize raw backend rows and build a catalog from them.
    pub fn from_rows(rows: &[Value]) -> Self {
        let courses = normalize::normalize_rows(rows);
        info!(
            "Normalized {} of {} course rows",
            courses.len(),
            rows.len()
        );
        Self::from_courses(courses)
    }

    /// Load a catalog from a JSON file holding an array of course rows.
    ///
    /// Steps:
    /// 1. Read the file
    /// 2. Parse the payload into rows
    /// 3. Normalize rows in parallel
    /// 4. Index the resulting courses
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading course catalog from {:?}", path);
        let json = std::fs::read_to_string(path)?;
        let rows = normalize::parse_rows(&json)?;
        let catalog = Self::from_rows(&rows);
        info!(
            "Catalog ready: {} courses in {} categories",
            catalog.len(),
            catalog.category_index.len()
        );
        Ok(catalog)
    }

    /// Insert a course and update indices.
    ///
    /// Returns `false` (and leaves the catalog untouched) when a course with
    /// the same id is already present.
    pub fn insert_course(&mut self, course: Course) -> bool {
        if self.by_id.contains_key(&course.id) {
            return false;
        }

        let position = self.courses.len();
        self.by_id.insert(course.id.clone(), position);

        if !course.category.is_empty() {
            self.category_index
                .entry(course.category.clone())
                .or_default()
                .push(position);
        }

        if !self
            .instructors
            .iter()
            .any(|known| known.name == course.instructor.name)
        {
            self.instructors.push(course.instructor.clone());
        }

        self.courses.push(course);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_duplicate_ids_keep_first() {
        let catalog = Catalog::from_courses(vec![
            Course::new("a", "First"),
            Course::new("b", "Second"),
            Course::new("a", "Shadowed"),
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(&CourseId::from("a")).unwrap().title, "First");
    }

    #[test]
    fn test_category_index_and_instructors() {
        let catalog = Catalog::from_courses(vec![
            Course::new("1", "Rust").with_category("Development").with_instructor("Ada", ""),
            Course::new("2", "Pitching").with_category("Business").with_instructor("Grace", ""),
            Course::new("3", "Go").with_category("Development").with_instructor("Ada", ""),
        ]);

        let dev: Vec<&str> = catalog
            .courses_in_category("Development")
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(dev, vec!["1", "3"]);
        assert_eq!(catalog.categories().collect::<Vec<_>>(), vec!["Business", "Development"]);
        assert_eq!(catalog.instructors().len(), 2);
        assert!(catalog.courses_in_category("Cooking").is_empty());
    }

    #[test]
    fn test_from_rows() {
        let rows = vec![
            json!({ "id": "x", "title": "One", "language": ["French"] }),
            json!({ "id": "y", "title": "Two" }),
        ];
        let catalog = Catalog::from_rows(&rows);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.languages(), vec!["English", "French"]);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = Catalog::load_from_file(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(crate::CatalogError::Io(_))));
    }
}
