//! # Search Crate
//!
//! Free-text search over the course catalog.
//!
//! ## Components
//!
//! ### QueryMatcher
//! Case-insensitive substring matching:
//! - Grouped suggestions (courses, instructors, categories) for the search box
//! - `prefilter` for the search results view
//!
//! ### Debouncer
//! Collapses a burst of keystrokes into one value once input stays quiet
//! for the configured period.
//!
//! ### SearchPanel
//! The search box state machine. Typing is debounced, submitting is
//! immediate, and results of superseded queries are discarded.
//!
//! ## Example Usage
//!
//! ```ignore
//! use search::{QueryMatcher, SearchPanel, DEFAULT_DEBOUNCE, DEFAULT_SUGGESTION_LIMIT};
//! use std::sync::Arc;
//!
//! let matcher = Arc::new(QueryMatcher::new(catalog.clone(), DEFAULT_SUGGESTION_LIMIT));
//! let panel = SearchPanel::new(matcher, DEFAULT_DEBOUNCE);
//!
//! panel.input("react");
//! // ...400ms later the panel opens with suggestions
//! if let Some(nav) = panel.submit() {
//!     println!("go to /search?q={}", nav.query);
//! }
//! ```

pub mod matcher;
pub mod debounce;
pub mod panel;

pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use matcher::{
    matches_query, prefilter, CourseSuggestion, QueryMatcher, Suggestions, DEFAULT_SUGGESTION_LIMIT,
};
pub use panel::{PanelSnapshot, SearchNavigation, SearchPanel};
