//! Fixed-size pages over a sorted course list.
//!
//! Pages are 1-indexed. An empty list still has one (empty) page, so the
//! view can always render "page 1 of 1".

use catalog::Course;
use std::num::NonZeroUsize;
use tracing::debug;

/// One page of results plus what the view needs for page controls.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub items: Vec<&'a Course>,
    /// The page these items belong to, 1-indexed
    pub page: usize,
    pub total_pages: usize,
    /// Number of courses across all pages
    pub total_items: usize,
}

impl Page<'_> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// `ceil(count / page_size)`, never less than 1.
pub fn total_pages(count: usize, page_size: NonZeroUsize) -> usize {
    count.div_ceil(page_size.get()).max(1)
}

/// Slice out `page` of `courses`, clamping `page` into `[1, total_pages]`.
pub fn paginate<'a>(courses: &[&'a Course], page_size: NonZeroUsize, page: usize) -> Page<'a> {
    let total_pages = total_pages(courses.len(), page_size);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * page_size.get();
    let end = (start + page_size.get()).min(courses.len());

    Page {
        items: courses.get(start..end).map(<[_]>::to_vec).unwrap_or_default(),
        page,
        total_pages,
        total_items: courses.len(),
    }
}

/// Page cursor owned by a view.
///
/// Navigation outside `[1, total_pages]` is ignored: the cursor stays where
/// it is and the call reports `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: NonZeroUsize,
}

impl Pagination {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self { page: 1, page_size }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Jump to `page`. Returns whether the cursor moved.
    pub fn go_to(&mut self, page: usize, total_pages: usize) -> bool {
        if page < 1 || page > total_pages {
            debug!("Ignoring navigation to page {} of {}", page, total_pages);
            return false;
        }
        let moved = page != self.page;
        self.page = page;
        moved
    }

    pub fn next(&mut self, total_pages: usize) -> bool {
        self.go_to(self.page + 1, total_pages)
    }

    pub fn previous(&mut self, total_pages: usize) -> bool {
        match self.page.checked_sub(1) {
            Some(previous) => self.go_to(previous, total_pages),
            None => false,
        }
    }

    /// Back to page 1. Called whenever the filters or query change.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// The current page of `courses`.
    pub fn slice<'a>(&self, courses: &[&'a Course]) -> Page<'a> {
        paginate(courses, self.page_size, self.page)
    }
}
