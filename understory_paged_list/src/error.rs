// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Precondition errors for paged list operations.

use core::fmt;

/// Error returned when a call violates one of the paged list's preconditions.
///
/// These describe caller mistakes (bad indices, malformed page payloads,
/// writes into pages that are not resident), not runtime conditions. Reading
/// an unloaded slot is **not** an error: it yields `None`.
///
/// A call that returns an error leaves the list unchanged.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PageError {
    /// A page size of zero was requested.
    ZeroPageSize,
    /// A logical index was outside the valid range.
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The logical length at the time of the call.
        count: usize,
    },
    /// A page number was outside `[start_page, last_page]`.
    PageOutOfRange {
        /// The offending page number.
        page: usize,
        /// First valid page number.
        start_page: usize,
        /// Last valid page number.
        last_page: usize,
    },
    /// A page payload did not have the length the page requires.
    PageSizeMismatch {
        /// The page being set.
        page: usize,
        /// Required number of elements.
        expected: usize,
        /// Number of elements supplied.
        actual: usize,
    },
    /// The logical length would need page numbers past `usize::MAX`.
    CountOverflow {
        /// The requested logical length.
        count: usize,
        /// Page number of logical index `0`.
        start_page: usize,
    },
    /// The operation needs a page that is not loaded.
    UnloadedPage {
        /// The page that must be loaded first.
        page: usize,
    },
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPageSize => write!(f, "page size must be non-zero"),
            Self::IndexOutOfRange { index, count } => {
                write!(f, "index {index} is out of range for length {count}")
            }
            Self::PageOutOfRange {
                page,
                start_page,
                last_page,
            } => write!(
                f,
                "page {page} is outside the valid page range {start_page}..={last_page}"
            ),
            Self::PageSizeMismatch {
                page,
                expected,
                actual,
            } => write!(
                f,
                "page {page} requires {expected} elements but {actual} were supplied"
            ),
            Self::CountOverflow { count, start_page } => write!(
                f,
                "length {count} overflows page numbers starting at {start_page}"
            ),
            Self::UnloadedPage { page } => write!(f, "page {page} is not loaded"),
        }
    }
}

impl core::error::Error for PageError {}

#[cfg(test)]
mod tests {
    use super::PageError;
    use alloc::string::ToString;

    #[test]
    fn display_names_the_offending_values() {
        let err = PageError::PageSizeMismatch {
            page: 3,
            expected: 10,
            actual: 7,
        };
        assert_eq!(
            err.to_string(),
            "page 3 requires 10 elements but 7 were supplied"
        );
        assert_eq!(
            PageError::UnloadedPage { page: 2 }.to_string(),
            "page 2 is not loaded"
        );
        assert_eq!(
            PageError::CountOverflow {
                count: 25,
                start_page: usize::MAX
            }
            .to_string(),
            alloc::format!("length 25 overflows page numbers starting at {}", usize::MAX)
        );
    }
}
