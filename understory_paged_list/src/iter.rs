// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sequence views over a [`PagedList`].
//!
//! Two views are provided:
//!
//! - [`Slots`]: one item per logical index in `0..count`, `Some(&T)` where the
//!   page is resident and `None` where it is not. `map`, `filter`, `fold` and
//!   friends come from [`Iterator`].
//! - [`LoadedPages`] / [`PagedList::loaded_elements`]: only the resident data,
//!   in ascending page order regardless of the order pages were loaded in.

use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::PagedList;

/// Iterator over every logical slot of a [`PagedList`].
///
/// Created by [`PagedList::slots`].
#[derive(Debug)]
pub struct Slots<'a, T> {
    list: &'a PagedList<T>,
    front: usize,
    back: usize,
}

impl<'a, T> Iterator for Slots<'a, T> {
    type Item = Option<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let slot = self.list.slot(self.front);
        self.front += 1;
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl<T> DoubleEndedIterator for Slots<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.list.slot(self.back))
    }
}

impl<T> ExactSizeIterator for Slots<'_, T> {}

impl<T> FusedIterator for Slots<'_, T> {}

/// Iterator over resident pages as `(page_number, elements)`, in ascending
/// page order.
///
/// Created by [`PagedList::loaded_pages`].
#[derive(Debug)]
pub struct LoadedPages<'a, T> {
    list: &'a PagedList<T>,
    order: alloc::vec::IntoIter<usize>,
}

impl<'a, T> Iterator for LoadedPages<'a, T> {
    type Item = (usize, &'a [T]);

    fn next(&mut self) -> Option<Self::Item> {
        let list = self.list;
        self.order
            .by_ref()
            .find_map(|page| list.page(page).map(|elements| (page, elements)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.order.len()))
    }
}

impl<T> FusedIterator for LoadedPages<'_, T> {}

impl<T> PagedList<T> {
    /// Returns an iterator yielding `Some(&T)` or `None` for each logical
    /// index in `0..count()`.
    ///
    /// ```rust
    /// use understory_paged_list::PagedList;
    ///
    /// let mut list = PagedList::new(6, 2).unwrap();
    /// list.set_page(1, vec![20, 30]).unwrap();
    ///
    /// let slots: Vec<_> = list.slots().map(|slot| slot.copied()).collect();
    /// assert_eq!(slots, [None, None, Some(20), Some(30), None, None]);
    ///
    /// let resident_sum = list.slots().flatten().sum::<i32>();
    /// assert_eq!(resident_sum, 50);
    /// ```
    #[must_use]
    pub fn slots(&self) -> Slots<'_, T> {
        Slots {
            list: self,
            front: 0,
            back: self.count,
        }
    }

    /// Returns the resident pages in ascending page order.
    #[must_use]
    pub fn loaded_pages(&self) -> LoadedPages<'_, T> {
        let mut order: Vec<usize> = self.pages.keys().copied().collect();
        order.sort_unstable();
        LoadedPages {
            list: self,
            order: order.into_iter(),
        }
    }

    /// Returns every resident element, concatenated in ascending page order.
    ///
    /// The result is not aligned with logical indices across unloaded gaps;
    /// it is simply everything currently in memory, in page order.
    pub fn loaded_elements(&self) -> impl Iterator<Item = &T> + '_ {
        self.loaded_pages().flat_map(|(_, elements)| elements.iter())
    }
}

impl<'a, T> IntoIterator for &'a PagedList<T> {
    type Item = Option<&'a T>;
    type IntoIter = Slots<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots()
    }
}

#[cfg(test)]
mod tests {
    use crate::PagedList;
    use alloc::vec::Vec;

    fn list_loading(order: &[usize]) -> PagedList<usize> {
        let mut list = PagedList::new(40, 10).unwrap();
        for &page in order {
            let range = list.indexes_for_page(page).unwrap();
            list.set_page(page, range.collect()).unwrap();
        }
        list
    }

    #[test]
    fn loaded_elements_ignore_load_order() {
        let shuffled = list_loading(&[1, 2, 0, 3]);
        let sorted = list_loading(&[0, 1, 2, 3]);
        let a: Vec<_> = shuffled.loaded_elements().copied().collect();
        let b: Vec<_> = sorted.loaded_elements().copied().collect();
        assert_eq!(a, b);
        assert_eq!(a, (0..40).collect::<Vec<_>>());
    }

    #[test]
    fn loaded_pages_skip_gaps() {
        let list = list_loading(&[3, 1]);
        let pages: Vec<_> = list.loaded_pages().map(|(page, _)| page).collect();
        assert_eq!(pages, [1, 3]);
        assert_eq!(list.loaded_elements().next(), Some(&10));
    }

    #[test]
    fn slots_cover_the_logical_range_from_both_ends() {
        let list = list_loading(&[0]);
        let mut slots = list.slots();
        assert_eq!(slots.len(), 40);
        assert_eq!(slots.next(), Some(Some(&0)));
        assert_eq!(slots.next_back(), Some(None));
        assert_eq!(slots.nth(8), Some(Some(&9)));
        assert_eq!(slots.next(), Some(None));
        assert_eq!(slots.len(), 28);
    }

    #[test]
    fn map_filter_fold_over_slots() {
        let list = list_loading(&[2]);
        let mut present = 0;
        for slot in &list {
            if slot.is_some() {
                present += 1;
            }
        }
        assert_eq!(present, 10);
        assert_eq!(list.slots().filter(Option::is_some).count(), 10);

        let doubled: Vec<_> = list.slots().map(|slot| slot.map(|v| v * 2)).collect();
        assert_eq!(doubled[20], Some(40));
        assert_eq!(doubled[19], None);

        let sum = list
            .slots()
            .fold(0, |acc, slot| acc + slot.copied().unwrap_or(0));
        assert_eq!(sum, (20..30).sum::<usize>());
    }
}
