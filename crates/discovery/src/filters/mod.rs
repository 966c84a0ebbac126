//! Filter implementations for the course pipeline.
//!
//! One filter per dimension of `FilterState`. All of them are composed by
//! `FilterPipeline::standard`.

pub mod category;
pub mod duration;
pub mod language;
pub mod level;
pub mod minimum_rating;
pub mod price;

// Re-export for convenience
pub use category::CategoryFilter;
pub use duration::DurationFilter;
pub use language::LanguageFilter;
pub use level::LevelFilter;
pub use minimum_rating::MinimumRatingFilter;
pub use price::PriceFilter;
