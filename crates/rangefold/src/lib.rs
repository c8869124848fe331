//! # rangefold
//!
//! Array-backed range query structures that are generic over an associative operation.
//!
//! * [Fenwick] is a binary indexed tree supporting point updates through `combine` and
//!   prefix folds. Attaching an inverse (see [InverseOperation]) additionally enables
//!   point reads, point replacement and two-sided range folds.
//! * [SegmentTree] supports point assignment and order-preserving range folds without
//!   requiring an inverse.
//!
//! Both structures are built on the [Operation] trait, which supplies an identity element
//! and an associative `combine`. Ready-made operations live in [ops], and any closure can be
//! used through [FnOperation].
//!
//! ```
//! use rangefold::{ops::{min_max::U32Min, sum::I64Sum}, Fenwick, SegmentTree};
//!
//! let mut fenwick = Fenwick::new(5, I64Sum).unwrap();
//! for (i, v) in [1, 2, 3, 4, 5].into_iter().enumerate() {
//!     fenwick.add(i, v).unwrap();
//! }
//! assert_eq!(fenwick.accumulate(1, 3), Ok(9));
//!
//! let tree = SegmentTree::from_values(U32Min, [5, 2, 8, 1]).unwrap();
//! assert_eq!(tree.accumulate(0, 1), Ok(2));
//! ```
//!
//! The structures do no internal locking. Callers sharing an instance between threads
//! must wrap it in their own lock.
//!
//! # Feature Flags
//!
//! - `std` (_enabled by default_)
//!     - Implements `std::error::Error` for [Error]. Without it the crate is `no_std` and
//!       only requires `alloc`.
//! - `profiler`
//!     - Records per-operation latency sketches, available through `stats()`.
//!       Profiled structures are not `Send`.
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[doc(hidden)]
#[macro_use]
mod macros;

mod error;
/// Binary indexed tree over an associative operation
pub mod fenwick;
/// Associative operations that the structures fold with
pub mod ops;
/// Segment tree over an associative operation
pub mod segment;

cfg_profiler! {
    /// Per-operation latency recording
    pub mod stats;
}

use core::ops::{Bound, RangeBounds};

pub use error::Error;
pub use fenwick::Fenwick;
pub use ops::{FnOperation, InverseOperation, NoInverse, Operation};
pub use segment::SegmentTree;

/// Converts range bounds into an inclusive `(first, last)` pair within `[0, len)`
///
/// Returns `Ok(None)` for an empty range.
pub(crate) fn into_inclusive(
    range: &impl RangeBounds<usize>,
    len: usize,
) -> Result<Option<(usize, usize)>, Error> {
    let start = match range.start_bound() {
        Bound::Included(&n) => Some(n),
        Bound::Excluded(&n) => n.checked_add(1),
        Bound::Unbounded => Some(0),
    };
    let end = match range.end_bound() {
        Bound::Included(&n) => n.checked_add(1),
        Bound::Excluded(&n) => Some(n),
        Bound::Unbounded => Some(len),
    };
    let (Some(start), Some(end)) = (start, end) else {
        return Err(Error::IndexOutOfRange {
            index: usize::MAX,
            len,
        });
    };
    if end > len {
        return Err(Error::IndexOutOfRange {
            index: end - 1,
            len,
        });
    }
    if start >= end {
        return if start > len {
            Err(Error::IndexOutOfRange { index: start, len })
        } else {
            Ok(None)
        };
    }
    Ok(Some((start, end - 1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inclusive_ranges() {
        assert_eq!(into_inclusive(&(..), 4), Ok(Some((0, 3))));
        assert_eq!(into_inclusive(&(1..3), 4), Ok(Some((1, 2))));
        assert_eq!(into_inclusive(&(1..=3), 4), Ok(Some((1, 3))));
        assert_eq!(into_inclusive(&(2..), 4), Ok(Some((2, 3))));
        assert_eq!(
            into_inclusive(&(Bound::Excluded(0), Bound::Included(1)), 4),
            Ok(Some((1, 1)))
        );
    }

    #[test]
    fn empty_ranges() {
        assert_eq!(into_inclusive(&(2..2), 4), Ok(None));
        assert_eq!(into_inclusive(&(4..), 4), Ok(None));
        #[allow(clippy::reversed_empty_ranges)]
        let reversed = 3..1;
        assert_eq!(into_inclusive(&reversed, 4), Ok(None));
    }

    #[test]
    fn out_of_range() {
        assert_eq!(
            into_inclusive(&(0..5), 4),
            Err(Error::IndexOutOfRange { index: 4, len: 4 })
        );
        assert_eq!(
            into_inclusive(&(0..=usize::MAX), 4),
            Err(Error::IndexOutOfRange {
                index: usize::MAX,
                len: 4
            })
        );
        assert_eq!(
            into_inclusive(&(Bound::Included(6), Bound::Excluded(2)), 4),
            Err(Error::IndexOutOfRange { index: 6, len: 4 })
        );
    }
}
