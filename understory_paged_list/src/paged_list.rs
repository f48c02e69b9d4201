// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page store: construction, page loading/unloading, and indexed access.

use alloc::vec::Vec;
use core::marker::PhantomData;
use core::ops::Range;

use hashbrown::HashMap;
use tracing::{debug, trace};

use crate::{PageError, PageLayout};

/// How [`PagedList::set_page`] treats payloads whose length differs from the
/// page's expected length.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LastPagePolicy {
    /// Payload lengths must match exactly; mismatches are errors.
    ///
    /// Use this when the total length is authoritative (for example, it came
    /// from a `total` field of the first response).
    #[default]
    Strict,
    /// The data source decides where the sequence ends.
    ///
    /// - A payload for the last page may hold anywhere from `0` to `page_size`
    ///   elements; the logical length follows it.
    /// - A short payload for an earlier page marks the end of the data: the
    ///   logical length shrinks to end on that page and later pages are evicted.
    /// - Payloads longer than `page_size` are still rejected.
    AdjustCount,
}

/// A logical sequence of `count` elements, of which only some pages are
/// resident.
///
/// Reads never fail on unloaded data: [`get`](Self::get) yields `Ok(None)` for
/// slots whose page has not been fetched, which is the caller's cue to fetch
/// it and hand the result to [`set_page`](Self::set_page).
///
/// Every loaded page except the last holds exactly `page_size` elements, and
/// a loaded last page holds exactly the remainder. Operations that would break
/// that (short payloads, writes into unloaded pages) return a [`PageError`]
/// and leave the list untouched.
///
/// ```rust
/// use understory_paged_list::PagedList;
///
/// let mut list = PagedList::<u32>::new(25, 10).unwrap();
/// assert_eq!(list.get(3), Ok(None));
///
/// // The fetch for page 0 completed.
/// list.set_page(0, (0..10).collect()).unwrap();
/// assert_eq!(list.get(3), Ok(Some(&3)));
///
/// // Page 2 is the short tail page.
/// assert_eq!(list.indexes_for_page(2), Ok(20..25));
/// assert!(list.set_page(2, (20..30).collect()).is_err());
/// list.set_page(2, (20..25).collect()).unwrap();
///
/// assert_eq!(list.loaded_elements().count(), 15);
/// ```
#[derive(Clone, Debug)]
pub struct PagedList<T> {
    pub(crate) layout: PageLayout,
    pub(crate) count: usize,
    pub(crate) pages: HashMap<usize, Vec<T>>,
    policy: LastPagePolicy,
}

/// Builder for [`PagedList`] configurations beyond [`PagedList::new`].
///
/// ```rust
/// use understory_paged_list::{LastPagePolicy, PagedList};
///
/// let list = PagedList::<String>::builder(20)
///     .count(95)
///     .start_page(1)
///     .last_page_policy(LastPagePolicy::AdjustCount)
///     .build()
///     .unwrap();
/// assert_eq!(list.last_page(), 5);
/// ```
#[derive(Debug)]
pub struct PagedListBuilder<T> {
    page_size: usize,
    start_page: usize,
    count: usize,
    policy: LastPagePolicy,
    marker: PhantomData<fn() -> T>,
}

impl<T> PagedListBuilder<T> {
    /// Sets the initial logical length. Defaults to `0`.
    #[must_use]
    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Sets the page number of logical index `0`. Defaults to `0`.
    #[must_use]
    pub fn start_page(mut self, start_page: usize) -> Self {
        self.start_page = start_page;
        self
    }

    /// Sets the payload length policy. Defaults to [`LastPagePolicy::Strict`].
    #[must_use]
    pub fn last_page_policy(mut self, policy: LastPagePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds an empty-paged list.
    ///
    /// Fails with [`PageError::ZeroPageSize`] if the page size is zero, and
    /// with [`PageError::CountOverflow`] if the pages of `count` elements
    /// would need page numbers past `usize::MAX`.
    pub fn build(self) -> Result<PagedList<T>, PageError> {
        let layout = PageLayout::new(self.page_size, self.start_page)?;
        layout.check_count(self.count)?;
        Ok(PagedList {
            layout,
            count: self.count,
            pages: HashMap::new(),
            policy: self.policy,
        })
    }
}

impl<T> PagedList<T> {
    /// Creates a list of `count` unloaded elements in pages of `page_size`,
    /// numbering pages from `0`.
    pub fn new(count: usize, page_size: usize) -> Result<Self, PageError> {
        Self::builder(page_size).count(count).build()
    }

    /// Starts building a list with pages of `page_size` elements.
    #[must_use]
    pub fn builder(page_size: usize) -> PagedListBuilder<T> {
        PagedListBuilder {
            page_size,
            start_page: 0,
            count: 0,
            policy: LastPagePolicy::Strict,
            marker: PhantomData,
        }
    }

    /// The page geometry of this list.
    #[must_use]
    pub fn layout(&self) -> PageLayout {
        self.layout
    }

    /// Maximum number of elements per page.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.layout.page_size()
    }

    /// Page number of the page holding logical index `0`.
    #[must_use]
    pub fn start_page(&self) -> usize {
        self.layout.start_page()
    }

    /// The payload length policy used by [`set_page`](Self::set_page).
    #[must_use]
    pub fn last_page_policy(&self) -> LastPagePolicy {
        self.policy
    }

    /// Total logical length, including unloaded slots.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns `true` if the logical length is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Last valid page number; [`start_page`](Self::start_page) when empty.
    #[must_use]
    pub fn last_page(&self) -> usize {
        self.layout.last_page(self.count)
    }

    /// Page number holding logical `index`.
    ///
    /// `index == count()` is accepted and names the page the next appended
    /// element lands on.
    pub fn page_for_index(&self, index: usize) -> Result<usize, PageError> {
        self.layout.page_for_index(index, self.count)
    }

    /// Half-open logical index range covered by `page`.
    pub fn indexes_for_page(&self, page: usize) -> Result<Range<usize>, PageError> {
        self.layout.indexes_for_page(page, self.count)
    }

    /// Returns `true` if `page` is resident.
    #[must_use]
    pub fn is_page_loaded(&self, page: usize) -> bool {
        self.pages.contains_key(&page)
    }

    /// Returns the contents of `page`, if it is resident.
    #[must_use]
    pub fn page(&self, page: usize) -> Option<&[T]> {
        self.pages.get(&page).map(Vec::as_slice)
    }

    /// Number of resident pages.
    #[must_use]
    pub fn loaded_page_count(&self) -> usize {
        self.pages.len()
    }

    /// Replaces the contents of `page` with `elements`.
    ///
    /// This is how fetched data enters the list. Under
    /// [`LastPagePolicy::Strict`] the payload must hold exactly
    /// `indexes_for_page(page).len()` elements; see [`LastPagePolicy`] for the
    /// relaxed rules.
    pub fn set_page(&mut self, page: usize, elements: Vec<T>) -> Result<(), PageError> {
        let range = self.loadable_page_range(page)?;
        let actual = elements.len();
        if actual == range.len() {
            self.pages.insert(page, elements);
            trace!(page, len = actual, "paged_list.set_page");
            return Ok(());
        }

        let page_size = self.layout.page_size();
        if self.policy == LastPagePolicy::Strict || actual > page_size {
            return Err(PageError::PageSizeMismatch {
                page,
                expected: if self.policy == LastPagePolicy::Strict {
                    range.len()
                } else {
                    page_size
                },
                actual,
            });
        }

        let count = range
            .start
            .checked_add(actual)
            .ok_or(PageError::CountOverflow {
                count: usize::MAX,
                start_page: self.start_page(),
            })?;
        self.set_count(count)?;
        debug!(
            page,
            old_count = self.count,
            new_count = count,
            "paged_list.set_page.adjust_count"
        );
        if actual > 0 {
            self.pages.insert(page, elements);
        }
        Ok(())
    }

    /// Evicts `page`, returning its contents if it was resident.
    ///
    /// The logical length is unchanged.
    pub fn remove_page(&mut self, page: usize) -> Option<Vec<T>> {
        self.pages.remove(&page)
    }

    /// Evicts every page. The logical length is unchanged.
    pub fn remove_all_pages(&mut self) {
        self.pages.clear();
    }

    /// Returns the element at `index`, or `None` if its page is not loaded.
    ///
    /// Fails only if `index >= count()`.
    pub fn get(&self, index: usize) -> Result<Option<&T>, PageError> {
        self.check_index(index)?;
        Ok(self.slot(index))
    }

    /// Mutable variant of [`get`](Self::get).
    pub fn get_mut(&mut self, index: usize) -> Result<Option<&mut T>, PageError> {
        self.check_index(index)?;
        let offset = self.layout.offset_in_page(index);
        Ok(self
            .pages
            .get_mut(&self.layout.page_of(index))
            .and_then(|elements| elements.get_mut(offset)))
    }

    /// Overwrites the element at `index`, returning the previous value.
    ///
    /// The page holding `index` must already be loaded; this never loads or
    /// creates pages. Fails with [`PageError::UnloadedPage`] otherwise.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, PageError> {
        self.check_index(index)?;
        let offset = self.layout.offset_in_page(index);
        let elements = self.loaded_page_mut(self.layout.page_of(index))?;
        Ok(core::mem::replace(&mut elements[offset], value))
    }

    /// Changes the logical length.
    ///
    /// Shrinking evicts every page past the new last page and truncates a
    /// resident new last page in place. Growing evicts the old last page if it
    /// was short, since its contents no longer cover the page.
    ///
    /// Fails with [`PageError::CountOverflow`] if the new length would need
    /// page numbers past `usize::MAX`; the list is then unchanged.
    pub fn set_count(&mut self, count: usize) -> Result<(), PageError> {
        let old_count = self.count;
        if count == old_count {
            return Ok(());
        }
        self.layout.check_count(count)?;
        let old_last = self.last_page();
        self.count = count;

        if count == 0 {
            self.pages.clear();
            debug!(old_count, "paged_list.set_count.clear");
            return Ok(());
        }

        if count < old_count {
            let new_last = self.last_page();
            self.pages.retain(|&page, _| {
                let keep = page <= new_last;
                if !keep {
                    debug!(page, "paged_list.set_count.evict");
                }
                keep
            });
            let len = count - self.layout.page_base(new_last);
            if let Some(elements) = self.pages.get_mut(&new_last) {
                elements.truncate(len);
            }
        } else if old_count > 0 {
            let page_size = self.layout.page_size();
            let short = self
                .pages
                .get(&old_last)
                .is_some_and(|elements| elements.len() < page_size);
            if short {
                self.pages.remove(&old_last);
                debug!(page = old_last, "paged_list.set_count.evict");
            }
        }
        Ok(())
    }

    /// Half-open range of page numbers covering the logical `range`.
    ///
    /// Handy for mapping a virtual list's visible strip to pages.
    #[must_use]
    pub fn pages_for_range(&self, range: Range<usize>) -> Range<usize> {
        self.layout.pages_for_range(range, self.count)
    }

    /// Pages covering the logical `range` that are not resident, ascending.
    ///
    /// ```rust
    /// use understory_paged_list::PagedList;
    ///
    /// let mut list = PagedList::<u8>::new(100, 10).unwrap();
    /// list.set_page(2, vec![0; 10]).unwrap();
    ///
    /// let missing: Vec<_> = list.missing_pages(15..45).collect();
    /// assert_eq!(missing, [1, 3, 4]);
    /// ```
    pub fn missing_pages(&self, range: Range<usize>) -> impl Iterator<Item = usize> + '_ {
        self.pages_for_range(range)
            .filter(move |page| !self.pages.contains_key(page))
    }

    /// Evicts every resident page that does not intersect the logical `range`.
    ///
    /// Returns the number of pages evicted.
    pub fn unload_pages_outside(&mut self, range: Range<usize>) -> usize {
        let keep = self.pages_for_range(range);
        let before = self.pages.len();
        self.pages.retain(|page, _| keep.contains(page));
        let evicted = before - self.pages.len();
        if evicted > 0 {
            debug!(evicted, "paged_list.unload_outside");
        }
        evicted
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<(), PageError> {
        if index >= self.count {
            return Err(PageError::IndexOutOfRange {
                index,
                count: self.count,
            });
        }
        Ok(())
    }

    /// Element at an in-range `index`, or `None` if unloaded.
    pub(crate) fn slot(&self, index: usize) -> Option<&T> {
        self.pages
            .get(&self.layout.page_of(index))
            .and_then(|elements| elements.get(self.layout.offset_in_page(index)))
    }

    pub(crate) fn loaded_page_mut(&mut self, page: usize) -> Result<&mut Vec<T>, PageError> {
        self.pages
            .get_mut(&page)
            .ok_or(PageError::UnloadedPage { page })
    }

    fn loadable_page_range(&self, page: usize) -> Result<Range<usize>, PageError> {
        if !self.layout.contains_page(page, self.count) {
            return Err(PageError::PageOutOfRange {
                page,
                start_page: self.start_page(),
                last_page: self.last_page(),
            });
        }
        self.indexes_for_page(page)
    }
}
