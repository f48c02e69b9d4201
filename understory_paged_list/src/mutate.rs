// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element-level mutations that shift elements across page boundaries.
//!
//! Pages must stay exactly `page_size` long (except the last one), so
//! inserting or removing a single element means carrying one element over
//! every page boundary between the edit and the end of the affected span.
//! Where a neighbor needed for that carry is not resident, the affected page
//! is evicted instead of being left with a hole; the caller refetches it.

use alloc::vec;

use tracing::debug;

use crate::{PageError, PagedList};

impl<T> PagedList<T> {
    /// Appends `value` at logical index `count()`.
    ///
    /// If the last page is full (or the list is empty), a new page holding
    /// only `value` is created; earlier pages do not need to be resident.
    /// Otherwise `value` joins the partially filled last page, which must be
    /// loaded. Fails with [`PageError::UnloadedPage`] if it is not, and with
    /// [`PageError::CountOverflow`] if the new length would need a page
    /// number past `usize::MAX`.
    ///
    /// ```rust
    /// use understory_paged_list::PagedList;
    ///
    /// let mut list = PagedList::new(20, 10).unwrap();
    /// list.set_page(1, (10..20).collect()).unwrap();
    ///
    /// list.append(20).unwrap();
    /// assert_eq!(list.count(), 21);
    /// assert_eq!(list.page(2), Some(&[20][..]));
    ///
    /// list.append(21).unwrap();
    /// assert_eq!(list.page(2), Some(&[20, 21][..]));
    /// ```
    pub fn append(&mut self, value: T) -> Result<(), PageError> {
        let count = self.count.checked_add(1).ok_or(PageError::CountOverflow {
            count: usize::MAX,
            start_page: self.layout.start_page(),
        })?;
        self.layout.check_count(count)?;
        let page = self.layout.page_of(self.count);
        if self.layout.offset_in_page(self.count) == 0 {
            self.pages.insert(page, vec![value]);
            debug!(page, "paged_list.append.new_page");
        } else {
            self.loaded_page_mut(page)?.push(value);
        }
        self.count = count;
        Ok(())
    }

    /// Removes the element at logical `index`, shrinking the list by one.
    ///
    /// Returns the removed element if its page was resident, `None` if it
    /// was not (the slot is still removed). Every later element shifts left
    /// by one; resident pages are refilled from their successor, and a
    /// resident page whose successor is not loaded is evicted.
    ///
    /// ```rust
    /// use understory_paged_list::PagedList;
    ///
    /// let mut list = PagedList::new(30, 10).unwrap();
    /// list.set_page(0, (0..10).collect()).unwrap();
    /// list.set_page(1, (10..20).collect()).unwrap();
    ///
    /// // Page 1 cannot be refilled from the unloaded page 2.
    /// assert_eq!(list.delete_at(10), Ok(Some(10)));
    /// assert_eq!(list.count(), 29);
    /// assert!(!list.is_page_loaded(1));
    /// assert_eq!(list.loaded_elements().count(), 10);
    /// ```
    pub fn delete_at(&mut self, index: usize) -> Result<Option<T>, PageError> {
        self.check_index(index)?;
        let layout = self.layout;
        let first = layout.page_of(index);
        let old_last = self.last_page();

        let removed = self
            .pages
            .get_mut(&first)
            .map(|elements| elements.remove(layout.offset_in_page(index)));
        self.count -= 1;

        for page in first..old_last {
            let carried = self
                .pages
                .get_mut(&(page + 1))
                .map(|elements| elements.remove(0));
            // Elements carried into an unloaded page are dropped with it.
            let Some(elements) = self.pages.get_mut(&page) else {
                continue;
            };
            match carried {
                Some(value) => elements.push(value),
                None => {
                    self.pages.remove(&page);
                    debug!(page, "paged_list.delete.evict");
                }
            }
        }

        let tail_len = self.pages.get(&old_last).map(|elements| elements.len());
        if let Some(len) = tail_len {
            let expected = layout.expected_page_len(old_last, self.count).ok();
            if self.count == 0 || expected != Some(len) {
                self.pages.remove(&old_last);
                debug!(page = old_last, "paged_list.delete.evict");
            }
        }

        Ok(removed)
    }

    /// Moves the element at `from` so that it ends up at `to`.
    ///
    /// Elements strictly between the two positions shift by one slot toward
    /// `from`, exactly like removing and reinserting in a `Vec`. Every page
    /// from `from`'s page to `to`'s page must be resident; this is checked
    /// before anything moves. A move onto itself is a no-op.
    ///
    /// ```rust
    /// use understory_paged_list::PagedList;
    ///
    /// let mut list = PagedList::new(20, 10).unwrap();
    /// list.set_page(0, (0..10).collect()).unwrap();
    /// list.set_page(1, (10..20).collect()).unwrap();
    ///
    /// list.move_element(15, 2).unwrap();
    /// assert_eq!(list.get(2), Ok(Some(&15)));
    /// assert_eq!(list.get(3), Ok(Some(&2)));
    /// assert_eq!(list.get(10), Ok(Some(&9)));
    /// assert_eq!(list.get(16), Ok(Some(&16)));
    /// ```
    pub fn move_element(&mut self, from: usize, to: usize) -> Result<(), PageError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(());
        }

        let layout = self.layout;
        let from_page = layout.page_of(from);
        let to_page = layout.page_of(to);
        let mut span = from_page.min(to_page)..=from_page.max(to_page);
        if let Some(page) = span.find(|page| !self.pages.contains_key(page)) {
            return Err(PageError::UnloadedPage { page });
        }

        let value = self
            .loaded_page_mut(from_page)?
            .remove(layout.offset_in_page(from));
        if from_page < to_page {
            for page in from_page..to_page {
                let carried = self.loaded_page_mut(page + 1)?.remove(0);
                self.loaded_page_mut(page)?.push(carried);
            }
        } else {
            for page in (to_page..from_page).rev() {
                if let Some(carried) = self.loaded_page_mut(page)?.pop() {
                    self.loaded_page_mut(page + 1)?.insert(0, carried);
                }
            }
        }
        self.loaded_page_mut(to_page)?
            .insert(layout.offset_in_page(to), value);
        Ok(())
    }
}
