// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index and page arithmetic.
//!
//! [`PageLayout`] maps flat logical indices to page numbers and in-page
//! offsets, and page numbers back to logical index ranges. It is a small
//! `Copy` value with no storage; every query that depends on the logical
//! length takes it as a `count` argument so the same layout can be reused as
//! the collection grows and shrinks.

use core::ops::Range;

use crate::PageError;

/// Fixed page geometry: how many elements a page holds and which page number
/// logical index `0` belongs to.
///
/// Page numbers do not need to start at zero. Many paged HTTP APIs count from
/// `1`, for example, and a layout with `start_page == 1` lets callers use the
/// server's page numbers directly.
///
/// ```rust
/// use understory_paged_list::PageLayout;
///
/// let layout = PageLayout::new(10, 1).unwrap();
/// assert_eq!(layout.page_for_index(0, 25), Ok(1));
/// assert_eq!(layout.page_for_index(24, 25), Ok(3));
/// assert_eq!(layout.last_page(25), 3);
/// assert_eq!(layout.indexes_for_page(3, 25), Ok(20..25));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PageLayout {
    page_size: usize,
    start_page: usize,
}

impl PageLayout {
    /// Creates a layout with `page_size` elements per page, numbering pages
    /// from `start_page`.
    ///
    /// Returns [`PageError::ZeroPageSize`] if `page_size` is zero.
    pub const fn new(page_size: usize, start_page: usize) -> Result<Self, PageError> {
        if page_size == 0 {
            return Err(PageError::ZeroPageSize);
        }
        Ok(Self {
            page_size,
            start_page,
        })
    }

    /// Maximum number of elements per page.
    #[must_use]
    pub const fn page_size(self) -> usize {
        self.page_size
    }

    /// Page number of the page holding logical index `0`.
    #[must_use]
    pub const fn start_page(self) -> usize {
        self.start_page
    }

    /// Number of pages spanned by `count` elements.
    #[must_use]
    pub const fn page_count(self, count: usize) -> usize {
        count.div_ceil(self.page_size)
    }

    /// Last valid page number for `count` elements.
    ///
    /// This is [`start_page`](Self::start_page) when `count` is zero.
    #[must_use]
    pub const fn last_page(self, count: usize) -> usize {
        if count == 0 {
            self.start_page
        } else {
            (count - 1) / self.page_size + self.start_page
        }
    }

    /// Returns the page number holding logical `index`.
    ///
    /// `index == count` is accepted: it names the slot the next appended
    /// element occupies.
    pub fn page_for_index(self, index: usize, count: usize) -> Result<usize, PageError> {
        if index > count {
            return Err(PageError::IndexOutOfRange { index, count });
        }
        Ok(self.page_of(index))
    }

    /// Position of logical `index` within its page.
    #[must_use]
    pub const fn offset_in_page(self, index: usize) -> usize {
        index % self.page_size
    }

    /// Returns `true` if `page` is a valid, non-empty page for `count` elements.
    #[must_use]
    pub const fn contains_page(self, page: usize, count: usize) -> bool {
        count > 0 && page >= self.start_page && page <= self.last_page(count)
    }

    /// Half-open logical index range covered by `page`.
    ///
    /// The last page is truncated at `count`. Fails if `page` is outside
    /// `[start_page, last_page]`.
    pub fn indexes_for_page(self, page: usize, count: usize) -> Result<Range<usize>, PageError> {
        let last_page = self.last_page(count);
        if page < self.start_page || page > last_page {
            return Err(PageError::PageOutOfRange {
                page,
                start_page: self.start_page,
                last_page,
            });
        }
        let start = self.page_base(page);
        Ok(start..count.min(start.saturating_add(self.page_size)))
    }

    /// Checks that every page of `count` elements, plus the slot after the
    /// last one, has a page number representable as `usize`.
    ///
    /// Fails with [`PageError::CountOverflow`] otherwise.
    pub const fn check_count(self, count: usize) -> Result<(), PageError> {
        match self.start_page.checked_add(count / self.page_size) {
            Some(_) => Ok(()),
            None => Err(PageError::CountOverflow {
                count,
                start_page: self.start_page,
            }),
        }
    }

    /// Number of elements `page` holds when fully loaded.
    pub fn expected_page_len(self, page: usize, count: usize) -> Result<usize, PageError> {
        self.indexes_for_page(page, count).map(|range| range.len())
    }

    /// Half-open range of page numbers covering the logical `range`.
    ///
    /// The range is clamped to `count` first; an empty result is returned as
    /// `start_page..start_page`.
    #[must_use]
    pub fn pages_for_range(self, range: Range<usize>, count: usize) -> Range<usize> {
        let end = range.end.min(count);
        let start = range.start.min(end);
        if start == end {
            return self.start_page..self.start_page;
        }
        self.page_of(start)..self.page_of(end - 1) + 1
    }

    /// Logical index of the first slot of `page`, without range checks.
    pub(crate) const fn page_base(self, page: usize) -> usize {
        (page - self.start_page) * self.page_size
    }

    /// Page number holding `index`, without range checks.
    pub(crate) const fn page_of(self, index: usize) -> usize {
        index / self.page_size + self.start_page
    }
}

#[cfg(test)]
mod tests {
    use super::PageLayout;
    use crate::PageError;

    #[test]
    fn zero_page_size_is_rejected() {
        assert_eq!(PageLayout::new(0, 0), Err(PageError::ZeroPageSize));
    }

    #[test]
    fn last_page_handles_exact_multiples_and_empty() {
        let layout = PageLayout::new(10, 0).unwrap();
        assert_eq!(layout.last_page(0), 0);
        assert_eq!(layout.last_page(1), 0);
        assert_eq!(layout.last_page(10), 0);
        assert_eq!(layout.last_page(11), 1);
        assert_eq!(layout.last_page(20), 1);

        let offset = PageLayout::new(10, 5).unwrap();
        assert_eq!(offset.last_page(0), 5);
        assert_eq!(offset.last_page(20), 6);
        assert_eq!(offset.page_count(20), 2);
        assert_eq!(offset.page_count(21), 3);
    }

    #[test]
    fn page_for_index_accepts_the_append_slot() {
        let layout = PageLayout::new(10, 1).unwrap();
        assert_eq!(layout.page_for_index(9, 20), Ok(1));
        assert_eq!(layout.page_for_index(10, 20), Ok(2));
        assert_eq!(layout.page_for_index(20, 20), Ok(3));
        assert_eq!(
            layout.page_for_index(21, 20),
            Err(PageError::IndexOutOfRange {
                index: 21,
                count: 20
            })
        );
    }

    #[test]
    fn indexes_for_page_truncates_last_page() {
        let layout = PageLayout::new(10, 0).unwrap();
        assert_eq!(layout.indexes_for_page(0, 25), Ok(0..10));
        assert_eq!(layout.indexes_for_page(2, 25), Ok(20..25));
        assert_eq!(layout.expected_page_len(2, 25), Ok(5));
        assert_eq!(
            layout.indexes_for_page(3, 25),
            Err(PageError::PageOutOfRange {
                page: 3,
                start_page: 0,
                last_page: 2
            })
        );
    }

    #[test]
    fn pages_below_start_are_out_of_range() {
        let layout = PageLayout::new(4, 2).unwrap();
        assert!(layout.indexes_for_page(1, 8).is_err());
        assert!(layout.contains_page(2, 8));
        assert!(layout.contains_page(3, 8));
        assert!(!layout.contains_page(4, 8));
        assert!(!layout.contains_page(2, 0));
    }

    #[test]
    fn pages_for_range_clamps_to_count() {
        let layout = PageLayout::new(10, 1).unwrap();
        assert_eq!(layout.pages_for_range(5..25, 100), 1..4);
        assert_eq!(layout.pages_for_range(0..10, 100), 1..2);
        assert_eq!(layout.pages_for_range(95..200, 100), 10..11);
        assert_eq!(layout.pages_for_range(120..200, 100), 1..1);
        assert_eq!(layout.pages_for_range(7..7, 100), 1..1);
    }

    #[test]
    fn check_count_rejects_page_numbers_past_usize_max() {
        let high = PageLayout::new(10, usize::MAX - 1).unwrap();
        assert_eq!(high.check_count(10), Ok(()));
        assert_eq!(
            high.check_count(25),
            Err(PageError::CountOverflow {
                count: 25,
                start_page: usize::MAX - 1
            })
        );
        // Full last page: the append slot needs the next page number.
        assert!(high.check_count(20).is_err());
        assert_eq!(high.last_page(10), usize::MAX - 1);
    }

    #[test]
    fn huge_pages_do_not_overflow_index_ranges() {
        let layout = PageLayout::new(usize::MAX / 2 + 2, 0).unwrap();
        let count = usize::MAX - 1;
        assert_eq!(layout.check_count(count), Ok(()));
        assert_eq!(layout.last_page(count), 1);
        assert_eq!(
            layout.indexes_for_page(1, count),
            Ok(usize::MAX / 2 + 2..count)
        );
        assert_eq!(layout.expected_page_len(0, count), Ok(usize::MAX / 2 + 2));
    }
}
