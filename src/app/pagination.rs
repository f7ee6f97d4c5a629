//! Pagination over the filtered hero set.
//!
//! The requested page is stored as-is and may go stale when the filtered set
//! shrinks; every read clamps it into `[1, total_pages]`, so slicing never
//! depends on the stored value being in range.

use std::ops::Range;

/// Page sizes offered to the user.
pub const ITEMS_PER_PAGE_OPTIONS: [usize; 4] = [5, 10, 20, 50];

/// Page size used until the user picks another.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 5;

/// Number of pages needed for `total_items`; never less than one.
///
/// # Examples
///
/// ```
/// use hero_roster::app::pagination::total_pages;
///
/// assert_eq!(total_pages(13, 5), 3);
/// assert_eq!(total_pages(0, 5), 1);
/// ```
#[must_use]
pub const fn total_pages(total_items: usize, items_per_page: usize) -> usize {
    if items_per_page == 0 {
        return 1;
    }
    let pages = total_items.div_ceil(items_per_page);
    if pages == 0 {
        1
    } else {
        pages
    }
}

/// Clamps `page` into `[1, total_pages]`.
#[must_use]
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Index range of `page` (1-based) within a list of `len` items.
#[must_use]
pub fn page_bounds(page: usize, items_per_page: usize, len: usize) -> Range<usize> {
    let start = page
        .saturating_sub(1)
        .saturating_mul(items_per_page)
        .min(len);
    let end = start.saturating_add(items_per_page).min(len);
    start..end
}

/// Derived pagination snapshot, recomputed on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    /// Clamped page actually used for slicing.
    pub current_page: usize,
    pub items_per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl PaginationState {
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Page numbers `1..=total_pages` for a page selector.
    #[must_use]
    pub fn page_numbers(&self) -> Vec<usize> {
        (1..=self.total_pages).collect()
    }

    /// Index range of the current page within the filtered list.
    #[must_use]
    pub fn bounds(&self) -> Range<usize> {
        page_bounds(self.current_page, self.items_per_page, self.total_items)
    }
}

/// Stored pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    requested_page: usize,
    items_per_page: usize,
}

impl Pagination {
    /// Starts on page one. `items_per_page` of zero falls back to the default.
    #[must_use]
    pub fn new(items_per_page: usize) -> Self {
        Self {
            requested_page: 1,
            items_per_page: if items_per_page == 0 {
                DEFAULT_ITEMS_PER_PAGE
            } else {
                items_per_page
            },
        }
    }

    #[must_use]
    pub const fn requested_page(&self) -> usize {
        self.requested_page
    }

    #[must_use]
    pub const fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Resolves the stored parameters against the current filtered count.
    #[must_use]
    pub fn resolve(&self, total_items: usize) -> PaginationState {
        let total_pages = total_pages(total_items, self.items_per_page);
        PaginationState {
            current_page: clamp_page(self.requested_page, total_pages),
            items_per_page: self.items_per_page,
            total_items,
            total_pages,
        }
    }

    /// Moves to `page` if it exists for `total_items`; returns whether it moved.
    pub fn go_to(&mut self, page: usize, total_items: usize) -> bool {
        if page < 1 || page > total_pages(total_items, self.items_per_page) {
            return false;
        }
        self.requested_page = page;
        true
    }

    /// Changes the page size and returns to page one.
    ///
    /// Returns `false` and leaves everything unchanged for a size of zero.
    pub fn set_items_per_page(&mut self, items_per_page: usize) -> bool {
        if items_per_page == 0 {
            return false;
        }
        self.items_per_page = items_per_page;
        self.requested_page = 1;
        true
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}
