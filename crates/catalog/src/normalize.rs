//! Normalizer for backend course rows.
//!
//! Two row shapes reach the client:
//! - catalog rows, straight from the `courses` table:
//!   `{ id, title, description, category, price, rating, duration, level,
//!      language, created_at, thumbnail, instructor: { name, avatar_url }, ... }`
//! - enrollment rows, with the course nested under `courses`:
//!   `{ id, course_id, progress, enrolled_at, courses: { ...catalog row... } }`
//!
//! Each shape has its own mapping function into [`Course`]. Fields are read
//! leniently: numbers may arrive as numeric strings, anything unparseable
//! becomes `0`, and absent optional fields take their defaults. A row is only
//! rejected when it cannot be identified at all.

use crate::error::{CatalogError, Result};
use crate::types::*;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

// =============================================================================
// Row shapes
// =============================================================================

/// Instructor as embedded in a row, either a joined profile or a bare name.
#[derive(Debug, Default)]
struct InstructorRow {
    name: Option<String>,
    avatar_url: Option<String>,
}

/// A row from the `courses` table.
#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(default, deserialize_with = "lenient_id")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    category: String,
    #[serde(default, deserialize_with = "lenient_number")]
    price: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    rating: f64,
    #[serde(default, deserialize_with = "lenient_opt_number")]
    duration: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_number")]
    duration_hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    level: String,
    #[serde(default, deserialize_with = "lenient_languages")]
    language: Vec<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    thumbnail: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    thumbnail_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    student_count: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    review_count: f64,
    #[serde(default = "published_by_default", deserialize_with = "lenient_bool")]
    is_published: bool,
    #[serde(default, deserialize_with = "lenient_instructor")]
    instructor: Option<InstructorRow>,
    /// Joined profile of the instructor (`profiles(full_name, avatar_url)`)
    #[serde(default, deserialize_with = "lenient_instructor")]
    profiles: Option<InstructorRow>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    instructor_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    instructor_avatar: Option<String>,
}

/// A row from the `enrollments` table with its course joined in.
#[derive(Debug, Deserialize)]
struct EnrollmentRow {
    #[serde(default, deserialize_with = "lenient_id")]
    course_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    progress: f64,
    #[serde(default)]
    courses: Option<CatalogRow>,
    #[serde(default)]
    course: Option<CatalogRow>,
}

/// Which backend shape a row arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowShape {
    Catalog,
    Enrollment,
}

fn detect_shape(value: &Value) -> Option<RowShape> {
    let object = value.as_object()?;
    let nested = |key: &str| object.get(key).is_some_and(Value::is_object);
    if nested("courses") || nested("course") {
        Some(RowShape::Enrollment)
    } else {
        Some(RowShape::Catalog)
    }
}

// =============================================================================
// Mapping
// =============================================================================

/// Normalize a single row.
///
/// Returns `Ok(None)` for catalog rows the backend marks unpublished, and an
/// error only when the row is not an object or carries no usable id.
pub fn normalize_row(row: usize, value: &Value) -> Result<Option<Course>> {
    let shape = detect_shape(value).ok_or_else(|| CatalogError::UnrecognizedRow {
        row,
        reason: "expected a JSON object".to_string(),
    })?;

    match shape {
        RowShape::Catalog => {
            let parsed = CatalogRow::deserialize(value).map_err(|e| unrecognized(row, e))?;
            if !parsed.is_published {
                debug!("Skipping unpublished course at row {}", row);
                return Ok(None);
            }
            catalog_row_to_course(row, parsed).map(Some)
        }
        RowShape::Enrollment => {
            let parsed = EnrollmentRow::deserialize(value).map_err(|e| unrecognized(row, e))?;
            enrollment_row_to_course(row, parsed).map(Some)
        }
    }
}

fn unrecognized(row: usize, err: serde_json::Error) -> CatalogError {
    CatalogError::UnrecognizedRow {
        row,
        reason: err.to_string(),
    }
}

/// Map a `courses` table row into a [`Course`].
fn catalog_row_to_course(row: usize, parsed: CatalogRow) -> Result<Course> {
    let id = parsed.id.clone().ok_or_else(|| CatalogError::MissingField {
        row,
        field: "id".to_string(),
    })?;
    Ok(build_course(id, parsed))
}

/// Map an enrollment row into the [`Course`] it enrolls in.
///
/// The course id comes from the nested course when present, otherwise from
/// the row's `course_id` column. The enrollment's own id is never used.
fn enrollment_row_to_course(row: usize, parsed: EnrollmentRow) -> Result<Course> {
    let nested = parsed.courses.or(parsed.course).ok_or_else(|| CatalogError::MissingField {
        row,
        field: "courses".to_string(),
    })?;
    let id = nested
        .id
        .clone()
        .or(parsed.course_id)
        .ok_or_else(|| CatalogError::MissingField {
            row,
            field: "course_id".to_string(),
        })?;
    debug!("Row {} is an enrollment at {:.0}% progress", row, parsed.progress);
    Ok(build_course(id, nested))
}

/// Shared tail of both mappings: apply defaults and invariants.
fn build_course(id: String, parsed: CatalogRow) -> Course {
    let level = parsed.level.parse().unwrap_or_else(|_| {
        if !parsed.level.is_empty() {
            debug!("Unknown level {:?} for course {}, using All Levels", parsed.level, id);
        }
        Level::AllLevels
    });

    let instructor_row = parsed
        .instructor
        .or(parsed.profiles)
        .unwrap_or_default();
    let instructor = Instructor {
        name: instructor_row
            .name
            .or(parsed.instructor_name)
            .unwrap_or_else(|| UNKNOWN_INSTRUCTOR.to_string()),
        avatar_url: instructor_row
            .avatar_url
            .or(parsed.instructor_avatar)
            .unwrap_or_default(),
    };

    let mut course = Course::new(id, parsed.title)
        .with_description(parsed.description)
        .with_category(parsed.category)
        .with_price(parsed.price)
        .with_rating(parsed.rating)
        .with_duration(parsed.duration.or(parsed.duration_hours).unwrap_or(0.0))
        .with_level(level)
        .with_languages(parsed.language)
        .with_created_at(parsed.created_at.unwrap_or_default());
    course.instructor = instructor;
    course.thumbnail = parsed
        .thumbnail
        .or(parsed.thumbnail_url)
        .unwrap_or_else(|| PLACEHOLDER_THUMBNAIL.to_string());
    course.student_count = to_count(parsed.student_count);
    course.review_count = to_count(parsed.review_count);
    course
}

fn to_count(value: f64) -> u32 {
    sanitize_non_negative(value).min(u32::MAX as f64) as u32
}

/// Normalize a batch of rows in parallel, preserving row order.
///
/// Never fails: rows that cannot be identified are logged and skipped, and
/// unpublished rows are dropped.
pub fn normalize_rows(values: &[Value]) -> Vec<Course> {
    let results: Vec<Option<Course>> = values
        .par_iter()
        .enumerate()
        .map(|(row, value)| match normalize_row(row, value) {
            Ok(course) => course,
            Err(e) => {
                warn!("Skipping course row: {}", e);
                None
            }
        })
        .collect();

    results.into_iter().flatten().collect()
}

/// Parse a JSON payload of rows.
///
/// Accepts either a bare array or a `{ "data": [...] }` envelope.
pub fn parse_rows(json: &str) -> Result<Vec<Value>> {
    let payload: Value = serde_json::from_str(json)?;
    match payload {
        Value::Array(rows) => Ok(rows),
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(Value::Array(rows)) => Ok(rows),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(other) => Err(CatalogError::UnrecognizedRow {
                row: 0,
                reason: format!("`data` must be an array, found {}", kind(&other)),
            }),
        },
        other => Err(CatalogError::UnrecognizedRow {
            row: 0,
            reason: format!("expected an array of rows, found {}", kind(&other)),
        }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// Lenient field readers
// =============================================================================

/// Numeric cast that mirrors what the backend's loosely typed columns need:
/// numbers pass through, numeric strings parse, everything else is 0.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<f64, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(coerce_number(&value).unwrap_or(0.0))
}

fn lenient_opt_number<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<f64>, D::Error> {
    let value = Value::deserialize(d)?;
    match value {
        Value::Null => Ok(None),
        other => Ok(Some(coerce_number(&other).unwrap_or(0.0))),
    }
}

fn coerce_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    Ok(coerce_string(Value::deserialize(d)?).unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<String>, D::Error> {
    Ok(coerce_string(Value::deserialize(d)?).filter(|s| !s.trim().is_empty()))
}

fn lenient_id<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<String>, D::Error> {
    Ok(coerce_string(Value::deserialize(d)?)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

fn published_by_default() -> bool {
    true
}

fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<bool, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::String(s) => !matches!(s.trim().to_lowercase().as_str(), "false" | "0" | "no"),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => true,
    })
}

/// Language tags arrive as an array or as a comma-separated string.
fn lenient_languages<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Vec<String>, D::Error> {
    let value = Value::deserialize(d)?;
    let tags: Vec<String> = match value {
        Value::Array(items) => items.into_iter().filter_map(coerce_string).collect(),
        Value::String(s) => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    };
    Ok(tags
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect())
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(parse_timestamp(&value))
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, bare dates and Unix seconds or
/// milliseconds.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
                return Some(ts.with_timezone(&Utc));
            }
            for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
                if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                    return Some(naive.and_utc());
                }
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        }
        Value::Number(n) => {
            let raw = n.as_i64()?;
            if raw.abs() >= 100_000_000_000 {
                DateTime::from_timestamp_millis(raw)
            } else {
                DateTime::from_timestamp(raw, 0)
            }
        }
        _ => None,
    }
}

fn lenient_instructor<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<InstructorRow>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::Object(fields) => {
            let pick = |keys: &[&str]| {
                keys.iter()
                    .filter_map(|k| fields.get(*k).cloned())
                    .filter_map(coerce_string)
                    .find(|s| !s.trim().is_empty())
            };
            Some(InstructorRow {
                name: pick(&["name", "full_name", "username"]),
                avatar_url: pick(&["avatar_url", "avatar", "avatarUrl"]),
            })
        }
        Value::String(name) if !name.trim().is_empty() => Some(InstructorRow {
            name: Some(name),
            avatar_url: None,
        }),
        _ => None,
    })
}
