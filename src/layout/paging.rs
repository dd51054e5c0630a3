// SPDX-License-Identifier: GPL-3.0-only

//! Paged grids for flat action catalogs.
//!
//! Emoji and image catalogs are flat action lists arranged into fixed-size
//! pages:
//!
//! 1. **Evening**: filler actions are appended until the count is a
//!    multiple of the page size, so every page holds exactly `page_size`
//!    actions.
//! 2. **Chunking**: the evened list is split into contiguous chunks in
//!    original order.
//! 3. **Column-major rearrangement**: within each chunk, an item's row is
//!    `index_in_chunk % rows_per_page`, so consecutive source items fill a
//!    column top-to-bottom before advancing to the next column.
//!
//! A [`PagedCatalog`] additionally records category boundaries while the
//! catalog is assembled, supporting "current page → category label"
//! lookups over `[start_page, end_page)` intervals.

use crate::layout::types::Action;
use crate::settings;

/// A fixed-capacity slice of an action catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Zero-based page index.
    index: usize,
    /// The page's actions in original catalog order, padded to exactly
    /// `page_size` with filler.
    actions: Vec<Action>,
    /// The column-major arrangement: `rows[r]` holds the chunk items whose
    /// index modulo the row count is `r`.
    rows: Vec<Vec<Action>>,
}

impl Page {
    /// Returns the page index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the page's actions in original catalog order.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Returns the column-major row arrangement.
    ///
    /// Reading a column top-to-bottom across these rows yields consecutive
    /// source items.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Action>] {
        &self.rows
    }
}

/// Arranges a flat catalog into fixed-size pages.
///
/// Returns `ceil(actions.len() / page_size)` pages, each holding exactly
/// `page_size` actions after evening. Zero `page_size` or `rows_per_page`
/// is a degenerate request and yields no pages.
#[must_use]
pub fn paginate(actions: &[Action], page_size: usize, rows_per_page: usize) -> Vec<Page> {
    if page_size == 0 || rows_per_page == 0 {
        tracing::warn!(
            "degenerate pagination request (page_size={}, rows_per_page={})",
            page_size,
            rows_per_page
        );
        return Vec::new();
    }

    // Evening: pad to a multiple of the page size.
    let mut evened = actions.to_vec();
    while evened.len() % page_size != 0 {
        evened.push(Action::None);
    }

    evened
        .chunks(page_size)
        .enumerate()
        .map(|(index, chunk)| {
            let mut rows: Vec<Vec<Action>> = vec![Vec::new(); rows_per_page];
            for (i, action) in chunk.iter().enumerate() {
                rows[i % rows_per_page].push(action.clone());
            }
            Page {
                index,
                actions: chunk.to_vec(),
                rows,
            }
        })
        .collect()
}

// ============================================================================
// Categorized Catalogs
// ============================================================================

/// A category's page interval within a paged catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CategoryRange {
    label: String,
    /// First page holding this category's items.
    start_page: usize,
    /// One past the last page, as recorded at append time.
    end_page: usize,
}

/// A flat action catalog assembled category by category.
///
/// Category page ranges are recorded while items are appended: a category
/// starts on page `items_so_far / page_size` and ends on the same quotient
/// taken after its items are in. The last category's range is widened to
/// cover any trailing padded page.
#[derive(Debug, Clone)]
pub struct PagedCatalog {
    page_size: usize,
    rows_per_page: usize,
    actions: Vec<Action>,
    categories: Vec<CategoryRange>,
}

impl Default for PagedCatalog {
    /// The standard emoji-grid geometry.
    fn default() -> Self {
        Self::new(settings::DEFAULT_PAGE_SIZE, settings::DEFAULT_ROWS_PER_PAGE)
    }
}

impl PagedCatalog {
    /// Creates an empty catalog with the given page geometry.
    #[must_use]
    pub fn new(page_size: usize, rows_per_page: usize) -> Self {
        Self {
            page_size,
            rows_per_page,
            actions: Vec::new(),
            categories: Vec::new(),
        }
    }

    /// Appends a category's actions, recording its page interval.
    pub fn append_category(&mut self, label: impl Into<String>, actions: Vec<Action>) {
        if self.page_size == 0 {
            return;
        }
        let start_page = self.actions.len() / self.page_size;
        self.actions.extend(actions);
        let end_page = self.actions.len() / self.page_size;
        self.categories.push(CategoryRange {
            label: label.into(),
            start_page,
            end_page,
        });
    }

    /// Total number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.actions.len().div_ceil(self.page_size)
    }

    /// Arranges the catalog into pages.
    #[must_use]
    pub fn pages(&self) -> Vec<Page> {
        paginate(&self.actions, self.page_size, self.rows_per_page)
    }

    /// Returns one page, or `None` for an out-of-range index.
    #[must_use]
    pub fn page(&self, index: usize) -> Option<Page> {
        // An invalid index is the caller's scroll state being stale; return
        // nothing rather than failing.
        self.pages().into_iter().nth(index)
    }

    /// Returns the category label for a page index.
    ///
    /// A page belongs to whichever `[start_page, end_page)` interval
    /// contains it; the last category's interval is widened to cover
    /// trailing padded pages. Out-of-range indices return `None`.
    #[must_use]
    pub fn category_for_page(&self, index: usize) -> Option<&str> {
        let page_count = self.page_count();
        if index >= page_count {
            return None;
        }
        let last = self.categories.len().checked_sub(1)?;
        self.categories
            .iter()
            .enumerate()
            .find(|(i, range)| {
                let end = if *i == last {
                    range.end_page.max(page_count)
                } else {
                    range.end_page
                };
                (range.start_page..end).contains(&index)
            })
            .map(|(_, range)| range.label.as_str())
    }

    /// Returns the registered category labels in append order.
    #[must_use]
    pub fn category_labels(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.label.as_str()).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn characters(count: usize) -> Vec<Action> {
        (0..count)
            .map(|i| Action::Character(format!("c{}", i)))
            .collect()
    }

    /// N actions at page size P yield ceil(N/P) pages of exactly P items.
    #[test]
    fn test_page_count_and_evening() {
        for (count, page_size, expected_pages) in
            [(26, 24, 2), (24, 24, 1), (1, 24, 1), (0, 24, 0), (25, 5, 5)]
        {
            let pages = paginate(&characters(count), page_size, 4);
            assert_eq!(
                pages.len(),
                expected_pages,
                "{} actions at page size {} should yield {} pages",
                count,
                page_size,
                expected_pages
            );
            for page in &pages {
                assert_eq!(
                    page.actions().len(),
                    page_size,
                    "every page should hold exactly page_size actions after evening"
                );
            }
        }
    }

    /// 26 actions at page size 24: the second page holds two real actions
    /// and filler beyond them.
    #[test]
    fn test_trailing_page_padding() {
        let pages = paginate(&characters(26), 24, 4);
        assert_eq!(pages.len(), 2);

        let second = &pages[1];
        assert_eq!(second.index(), 1);
        assert_eq!(second.actions()[0], Action::Character("c24".to_string()));
        assert_eq!(second.actions()[1], Action::Character("c25".to_string()));
        for (i, action) in second.actions().iter().enumerate().skip(2) {
            assert_eq!(
                *action,
                Action::None,
                "second page item {} should be filler",
                i
            );
        }
    }

    /// Column-major rearrangement: consecutive source items fill a column
    /// top-to-bottom before advancing.
    #[test]
    fn test_column_major_rearrangement() {
        let pages = paginate(&characters(8), 8, 4);
        assert_eq!(pages.len(), 1);
        let rows = pages[0].rows();
        assert_eq!(rows.len(), 4);

        // Items 0..=3 are column one, 4..=7 column two.
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(
                row,
                &vec![
                    Action::Character(format!("c{}", r)),
                    Action::Character(format!("c{}", r + 4)),
                ],
                "row {} should interleave the two columns",
                r
            );
        }
    }

    /// Degenerate geometry yields no pages instead of dividing by zero.
    #[test]
    fn test_degenerate_geometry() {
        assert!(paginate(&characters(10), 0, 4).is_empty());
        assert!(paginate(&characters(10), 8, 0).is_empty());
    }

    /// Category ranges cover all pages with no gaps, and every page maps to
    /// exactly one label.
    #[test]
    fn test_category_ranges_cover_all_pages() {
        let mut catalog = PagedCatalog::new(8, 4);
        catalog.append_category("smileys", characters(12)); // pages 0..1 (spills into 1)
        catalog.append_category("animals", characters(6)); // ends mid-page 2
        catalog.append_category("food", characters(3)); // trails into padding

        assert_eq!(catalog.page_count(), 3);
        for index in 0..catalog.page_count() {
            assert!(
                catalog.category_for_page(index).is_some(),
                "page {} should belong to a category",
                index
            );
        }
        assert_eq!(catalog.category_for_page(0), Some("smileys"));
        assert_eq!(
            catalog.category_for_page(2),
            Some("food"),
            "last category covers the trailing padded page"
        );
        assert_eq!(catalog.category_for_page(3), None, "out of range is None");
    }

    /// Category boundaries follow the items-so-far quotient rule.
    #[test]
    fn test_category_boundary_bookkeeping() {
        let mut catalog = PagedCatalog::new(10, 2);
        catalog.append_category("first", characters(10)); // exactly one page
        catalog.append_category("second", characters(10)); // exactly one page

        assert_eq!(catalog.category_for_page(0), Some("first"));
        assert_eq!(catalog.category_for_page(1), Some("second"));
        assert_eq!(catalog.category_labels(), vec!["first", "second"]);
    }

    /// The default geometry pages a standard emoji catalog.
    #[test]
    fn test_default_geometry() {
        let mut catalog = PagedCatalog::default();
        catalog.append_category("smileys", characters(26));

        let pages = catalog.pages();
        assert_eq!(pages.len(), 2, "26 actions at page size 24 make two pages");
        assert_eq!(pages[0].rows().len(), settings::DEFAULT_ROWS_PER_PAGE);
    }

    /// Invalid page lookups return None rather than failing.
    #[test]
    fn test_invalid_page_index() {
        let mut catalog = PagedCatalog::new(4, 2);
        catalog.append_category("only", characters(4));

        assert!(catalog.page(0).is_some());
        assert!(catalog.page(1).is_none(), "page 1 does not exist");
        assert!(catalog.category_for_page(7).is_none());

        let empty = PagedCatalog::new(4, 2);
        assert_eq!(empty.page_count(), 0);
        assert!(empty.page(0).is_none());
        assert!(empty.category_for_page(0).is_none());
    }
}
