//! Filtering, sorting and paging of course catalogs.
//!
//! This crate provides:
//! - `FilterState`, the filter dimensions a course view exposes
//! - Filter trait and one implementation per dimension
//! - FilterPipeline for composing filters
//! - Stable sort strategies and a paginator
//!
//! ## Architecture
//! Courses flow through three pure stages:
//! 1. Filters remove courses outside the selected dimensions (AND across
//!    dimensions, OR within one)
//! 2. The sort strategy orders what is left
//! 3. The paginator cuts out the page the view shows
//!
//! ## Example Usage
//! ```ignore
//! use discovery::{FilterPipeline, FilterState, Pagination, SortBy};
//!
//! let pipeline = FilterPipeline::standard();
//! let state = FilterState::new()
//!     .with_category("Development")
//!     .with_rating(4.0)
//!     .with_sort(SortBy::HighestRated);
//! let cursor = Pagination::new(NonZeroUsize::new(20).unwrap());
//!
//! let page = pipeline.run(catalog.courses().iter().collect(), &state, &cursor);
//! ```

pub mod traits;
pub mod state;
pub mod filters;
pub mod filter_pipeline;
pub mod sort;
pub mod paginate;

// Re-export main types
pub use traits::Filter;
pub use state::{DurationBucket, FilterState, PriceTier, SortBy};
pub use filter_pipeline::{filter, FilterPipeline};
pub use sort::sort;
pub use paginate::{paginate, total_pages, Page, Pagination};
