//! Runtime configuration for the course views.
//!
//! Every value has a default and can be overridden through the environment:
//!
//! | Variable             | Default |
//! |----------------------|---------|
//! | `COURSES_PAGE_SIZE`  | 20      |
//! | `SEARCH_PAGE_SIZE`   | 9       |
//! | `SEARCH_DEBOUNCE_MS` | 400     |
//! | `SUGGESTION_LIMIT`   | 5       |

use anyhow::{Context, Result};
use std::fmt::Display;
use std::num::{NonZeroU64, NonZeroUsize};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowseConfig {
    /// Page size of the Courses view
    pub courses_page_size: NonZeroUsize,
    /// Page size of the Search results view
    pub search_page_size: NonZeroUsize,
    /// Quiet period before the search box matches
    pub debounce: Duration,
    /// Maximum suggestions per group in the search box
    pub suggestion_limit: NonZeroUsize,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            courses_page_size: NonZeroUsize::new(20).unwrap_or(NonZeroUsize::MIN),
            search_page_size: NonZeroUsize::new(9).unwrap_or(NonZeroUsize::MIN),
            debounce: search::DEFAULT_DEBOUNCE,
            suggestion_limit: NonZeroUsize::new(search::DEFAULT_SUGGESTION_LIMIT)
                .unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl BrowseConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names.
    ///
    /// Unset variables fall back to their defaults. Values that do not parse,
    /// or are zero, are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let debounce_ms: NonZeroU64 = try_load(
            &lookup,
            "SEARCH_DEBOUNCE_MS",
            NonZeroU64::new(defaults.debounce.as_millis() as u64).unwrap_or(NonZeroU64::MIN),
        )?;

        Ok(Self {
            courses_page_size: try_load(&lookup, "COURSES_PAGE_SIZE", defaults.courses_page_size)?,
            search_page_size: try_load(&lookup, "SEARCH_PAGE_SIZE", defaults.search_page_size)?,
            debounce: Duration::from_millis(debounce_ms.get()),
            suggestion_limit: try_load(&lookup, "SUGGESTION_LIMIT", defaults.suggestion_limit)?,
        })
    }

    pub fn with_courses_page_size(mut self, size: NonZeroUsize) -> Self {
        self.courses_page_size = size;
        self
    }

    pub fn with_search_page_size(mut self, size: NonZeroUsize) -> Self {
        self.search_page_size = size;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_suggestion_limit(mut self, limit: NonZeroUsize) -> Self {
        self.suggestion_limit = limit;
        self
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value {raw:?}")),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
