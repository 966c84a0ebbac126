//! Core domain types for the course catalog.
//!
//! `Course` is the canonical, fully-defaulted record every downstream
//! component reads. Nothing optional survives normalization: a course always
//! has a language, a thumbnail path and a creation time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Identifiers
// =============================================================================

/// Stable course identifier as issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(String);

impl CourseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CourseId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Asset shown when a row carries no thumbnail.
pub const PLACEHOLDER_THUMBNAIL: &str = "/placeholder.svg";

/// Language assumed when a row carries none.
pub const DEFAULT_LANGUAGE: &str = "English";

/// Instructor shown when a row carries none.
pub const UNKNOWN_INSTRUCTOR: &str = "Unknown Instructor";

// =============================================================================
// Course-related Types
// =============================================================================

/// Difficulty level of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Level {
    #[default]
    #[serde(rename = "All Levels")]
    AllLevels,
    Beginner,
    Intermediate,
    Expert,
}

impl Level {
    pub const ALL: [Level; 4] = [
        Level::AllLevels,
        Level::Beginner,
        Level::Intermediate,
        Level::Expert,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Level::AllLevels => "All Levels",
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Expert => "Expert",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Level {
    type Err = String;

    /// Accepts display labels and the slug forms the backend stores
    /// ("all-levels", "all_levels"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "alllevels" | "all" => Ok(Level::AllLevels),
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "expert" | "advanced" => Ok(Level::Expert),
            _ => Err(format!("unknown level: {s}")),
        }
    }
}

/// Public profile of the person teaching a course.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instructor {
    pub name: String,
    pub avatar_url: String,
}

impl Default for Instructor {
    fn default() -> Self {
        Self {
            name: UNKNOWN_INSTRUCTOR.to_string(),
            avatar_url: String::new(),
        }
    }
}

/// A course as consumed by the discovery pipeline.
///
/// Invariants upheld by every constructor in this crate:
/// - `rating` is within `[0, 5]`
/// - `price` and `duration_hours` are non-negative
/// - `language` is never empty; the first entry is the primary language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub rating: f64,
    pub duration_hours: f64,
    pub level: Level,
    pub language: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub instructor: Instructor,
    pub thumbnail: String,
    pub student_count: u32,
    pub review_count: u32,
}

impl Course {
    /// Create a course with every optional attribute at its default.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: CourseId::new(id),
            title: title.into(),
            description: String::new(),
            category: String::new(),
            price: 0.0,
            rating: 0.0,
            duration_hours: 0.0,
            level: Level::AllLevels,
            language: vec![DEFAULT_LANGUAGE.to_string()],
            created_at: DateTime::<Utc>::default(),
            instructor: Instructor::default(),
            thumbnail: PLACEHOLDER_THUMBNAIL.to_string(),
            student_count: 0,
            review_count: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = sanitize_non_negative(price);
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = sanitize_rating(rating);
        self
    }

    pub fn with_duration(mut self, hours: f64) -> Self {
        self.duration_hours = sanitize_non_negative(hours);
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Replace the language tags. An empty list falls back to the default language.
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let languages: Vec<String> = languages
            .into_iter()
            .map(Into::into)
            .filter(|l| !l.trim().is_empty())
            .collect();
        self.language = if languages.is_empty() {
            vec![DEFAULT_LANGUAGE.to_string()]
        } else {
            languages
        };
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_instructor(mut self, name: impl Into<String>, avatar_url: impl Into<String>) -> Self {
        self.instructor = Instructor {
            name: name.into(),
            avatar_url: avatar_url.into(),
        };
        self
    }

    pub fn primary_language(&self) -> &str {
        self.language
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_LANGUAGE)
    }

    pub fn is_free(&self) -> bool {
        self.price == 0.0
    }
}

/// Clamp a rating into `[0, 5]`, mapping NaN to 0.
pub(crate) fn sanitize_rating(rating: f64) -> f64 {
    if rating.is_nan() {
        0.0
    } else {
        rating.clamp(0.0, 5.0)
    }
}

/// Clamp a price or duration to be non-negative and finite.
pub(crate) fn sanitize_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

// =============================================================================
// Catalog - The Shared Read-Only Course Set
// =============================================================================

/// The normalized course catalog for a session.
///
/// Built once when rows arrive and then shared behind an `Arc`. Course order
/// is the order rows arrived in, which is the order the pipeline sees when no
/// sort has been applied yet.
#[derive(Debug, Default)]
pub struct Catalog {
    pub(crate) courses: Vec<Course>,
    /// Position of each course in `courses`
    pub(crate) by_id: HashMap<CourseId, usize>,
    /// Course positions grouped by category, keyed by display name
    pub(crate) category_index: BTreeMap<String, Vec<usize>>,
    /// Distinct instructors in first-seen order
    pub(crate) instructors: Vec<Instructor>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// All courses, in arrival order
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn get(&self, id: &CourseId) -> Option<&Course> {
        self.by_id.get(id).map(|&idx| &self.courses[idx])
    }

    /// Courses in a category, in arrival order. Empty for unknown categories.
    pub fn courses_in_category(&self, category: &str) -> Vec<&Course> {
        self.category_index
            .get(category)
            .map(|positions| positions.iter().map(|&idx| &self.courses[idx]).collect())
            .unwrap_or_default()
    }

    /// Distinct category names, sorted
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.category_index.keys().map(String::as_str)
    }

    /// Distinct instructors in first-seen order
    pub fn instructors(&self) -> &[Instructor] {
        &self.instructors
    }

    /// Distinct language tags across the catalog, sorted
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self
            .courses
            .iter()
            .flat_map(|c| c.language.iter().map(String::as_str))
            .collect();
        languages.sort_unstable();
        languages.dedup();
        languages
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
