//! # Catalog Crate
//!
//! Turns backend course rows into the canonical, read-only course catalog.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Course, Level, Instructor, Catalog)
//! - **normalize**: Map both backend row shapes into `Course`
//! - **index**: Build the catalog and its lookup indices
//! - **seed**: Bundled fallback catalog
//! - **error**: Error types for loading and normalization
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(Catalog::load_from_file(Path::new("data/courses.json"))?);
//! println!("{} courses across {} categories", catalog.len(), catalog.categories().count());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod normalize;
pub mod index;
pub mod seed;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use normalize::{normalize_row, normalize_rows, parse_rows};
pub use seed::{seed_catalog, seed_rows};
pub use types::{
    Catalog,
    Course,
    CourseId,
    Instructor,
    Level,
    DEFAULT_LANGUAGE,
    PLACEHOLDER_THUMBNAIL,
    UNKNOWN_INSTRUCTOR,
};
