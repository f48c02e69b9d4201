// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_paged_list --heading-base-level=0

//! Understory Paged List: partially loaded, page-resident sequences.
//!
//! This crate provides [`PagedList`], a container for a logical sequence of
//! known length where only some fixed-size chunks ("pages") are in memory.
//! It is the data side of a virtualized list whose items come from slow,
//! chunked I/O such as paged HTTP endpoints: the list addresses items by flat
//! index, reports which pages are missing, and accepts whole pages of fetched
//! data.
//!
//! The core concepts are:
//!
//! - [`PageLayout`]: pure arithmetic mapping logical indices to page numbers
//!   and page numbers to index ranges, with a configurable first page number
//!   and a possibly short last page.
//! - [`PagedList`]: the page store. Pages are loaded with
//!   [`PagedList::set_page`] and evicted with [`PagedList::remove_page`] or
//!   [`PagedList::remove_all_pages`]. Single elements can be appended,
//!   deleted, and moved; those operations carry elements across page
//!   boundaries so every resident page stays complete.
//! - [`Slots`] and [`PagedList::loaded_elements`]: sequence views yielding
//!   `Option<&T>` per logical index, or only the resident data in page order.
//! - [`PageError`]: the precondition violations (bad indices, wrong-sized
//!   payloads, writes into pages that are not resident).
//!
//! This crate deliberately does **not** fetch anything, track in-flight
//! requests, or know about widgets. Host frameworks are responsible for:
//!
//! - Asking which pages a visible range needs via [`PagedList::missing_pages`].
//! - Starting fetches for those pages and de-duplicating in-flight requests.
//! - Handing completed results back with [`PagedList::set_page`] on the same
//!   thread that owns the list.
//! - Optionally trimming memory with [`PagedList::unload_pages_outside`].
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_paged_list::PagedList;
//!
//! // 1000 rows served 50 at a time, pages numbered from 1 like the server.
//! let mut rows = PagedList::<String>::builder(50)
//!     .count(1000)
//!     .start_page(1)
//!     .build()
//!     .unwrap();
//!
//! // The viewport shows rows 120..140; find what to fetch.
//! let wanted: Vec<usize> = rows.missing_pages(120..140).collect();
//! assert_eq!(wanted, [3]);
//!
//! // Pretend the fetch completed.
//! for page in wanted {
//!     let range = rows.indexes_for_page(page).unwrap();
//!     let payload = range.map(|i| format!("row {i}")).collect();
//!     rows.set_page(page, payload).unwrap();
//! }
//!
//! assert_eq!(rows.get(125).unwrap().map(String::as_str), Some("row 125"));
//! assert_eq!(rows.get(10), Ok(None));
//! ```
//!
//! ## Editing
//!
//! ```rust
//! use understory_paged_list::PagedList;
//!
//! let mut list = PagedList::new(20, 10).unwrap();
//! list.set_page(0, (0..10).collect()).unwrap();
//! list.set_page(1, (10..20).collect()).unwrap();
//!
//! list.move_element(12, 0).unwrap();
//! assert_eq!(list.get(0), Ok(Some(&12)));
//!
//! list.delete_at(0).unwrap();
//! assert_eq!(list.count(), 19);
//! assert_eq!(list.get(0), Ok(Some(&0)));
//!
//! list.append(99).unwrap();
//! assert_eq!(list.get(19), Ok(Some(&99)));
//! ```
//!
//! The list is a plain owned value: mutation takes `&mut self`, so it cannot
//! interleave with reads. It is not synchronized; wrap it in a lock if several
//! threads must touch it.
//!
//! Page loads and evictions emit `tracing` events at `trace`/`debug` level.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod iter;
mod layout;
mod mutate;
mod paged_list;

pub use error::PageError;
pub use iter::{LoadedPages, Slots};
pub use layout::PageLayout;
pub use paged_list::{LastPagePolicy, PagedList, PagedListBuilder};
