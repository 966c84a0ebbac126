//! # Browse Session
//!
//! Drives one course view from the shared catalog to the page on screen:
//! 1. Narrow by the search query (Search view only)
//! 2. Apply the filter pipeline
//! 3. Sort
//! 4. Cut out the current page
//!
//! Every `current_page` call is a full recompute; the session only stores
//! its inputs (filters, query, page cursor).

use crate::config::BrowseConfig;
use catalog::{Catalog, Course};
use discovery::{FilterPipeline, FilterState, Page, Pagination};
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::debug;

/// Which view the session backs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The full catalog
    Courses,
    /// Results for a search query
    Search,
}

pub struct BrowseSession {
    catalog: Arc<Catalog>,
    pipeline: FilterPipeline,
    view: View,
    filters: FilterState,
    query: String,
    pagination: Pagination,
}

impl BrowseSession {
    /// Session for the Courses view, paged by `courses_page_size`.
    pub fn courses(catalog: Arc<Catalog>, config: &BrowseConfig) -> Self {
        Self::new(catalog, View::Courses, Pagination::new(config.courses_page_size))
    }

    /// Session for the Search view, paged by `search_page_size`.
    pub fn search(catalog: Arc<Catalog>, query: impl Into<String>, config: &BrowseConfig) -> Self {
        let mut session = Self::new(catalog, View::Search, Pagination::new(config.search_page_size));
        session.query = query.into();
        session
    }

    fn new(catalog: Arc<Catalog>, view: View, pagination: Pagination) -> Self {
        Self {
            catalog,
            pipeline: FilterPipeline::standard(),
            view,
            filters: FilterState::default(),
            query: String::new(),
            pagination,
        }
    }

    /// Swap in a custom filter pipeline.
    pub fn with_pipeline(mut self, pipeline: FilterPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.pagination.page()
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.pagination.page_size()
    }

    /// Replace the filter state. Invoked on every filter interaction; always
    /// returns to page 1.
    pub fn set_filters(&mut self, filters: FilterState) {
        debug!("Filters changed, resetting to page 1");
        self.filters = filters;
        self.pagination.reset();
    }

    /// Replace the search query and return to page 1.
    ///
    /// Only the Search view narrows by query; the Courses view keeps the
    /// text but ignores it.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.pagination.reset();
    }

    /// The page the view currently shows.
    pub fn current_page(&self) -> Page<'_> {
        self.pipeline
            .run(self.candidates(), &self.filters, &self.pagination)
    }

    pub fn next_page(&mut self) -> bool {
        let total = self.current_page().total_pages;
        self.pagination.next(total)
    }

    pub fn previous_page(&mut self) -> bool {
        let total = self.current_page().total_pages;
        self.pagination.previous(total)
    }

    /// Jump to `page`. A no-op returning `false` outside `[1, total_pages]`.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let total = self.current_page().total_pages;
        self.pagination.go_to(page, total)
    }

    fn candidates(&self) -> Vec<&Course> {
        match self.view {
            View::Courses => self.catalog.courses().iter().collect(),
            View::Search => search::prefilter(self.catalog.courses(), &self.query),
        }
    }
}
