use crate::{
    Error,
    error::{check_index, check_size},
    into_inclusive,
    ops::{FnOperation, Operation},
};
use core::ops::RangeBounds;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[cfg(feature = "profiler")]
use crate::stats::Stats;

/// A bottom-up segment tree over an associative [Operation]
///
/// The tree keeps `2 * len()` values in heap order: leaves occupy `[len, 2 * len)` and
/// every internal node `i` holds `combine(node[2i], node[2i + 1])`. Assignments overwrite
/// a leaf and refresh its ancestors. Range folds preserve element order, so
/// non-commutative operations such as [Concat](crate::ops::Concat) are supported.
///
/// # Example
///
/// ```
/// use rangefold::{ops::min_max::I64Min, SegmentTree};
///
/// let mut tree = SegmentTree::new(4, I64Min).unwrap();
/// for (i, v) in [5, 2, 8, 1].into_iter().enumerate() {
///     tree.assign(i, v).unwrap();
/// }
/// assert_eq!(tree.accumulate(0, 3), Ok(1));
/// assert_eq!(tree.accumulate(0, 1), Ok(2));
///
/// tree.assign(3, 100).unwrap();
/// assert_eq!(tree.accumulate(2, 3), Ok(8));
/// ```
#[derive(Clone, Debug)]
pub struct SegmentTree<O: Operation> {
    op: O,
    size: usize,
    storage: Vec<O::Value>,
    #[cfg(feature = "profiler")]
    stats: Stats,
}

impl<T, C> SegmentTree<FnOperation<T, C>>
where
    T: Clone,
    C: Fn(&T, &T) -> T,
{
    /// Creates a tree from an identity element and a combine function
    ///
    /// ```
    /// use rangefold::SegmentTree;
    ///
    /// let max = |a: &u64, b: &u64| a.max(b).to_owned();
    /// let mut tree = SegmentTree::from_fn(3, 0u64, max).unwrap();
    /// tree.assign(1, 7).unwrap();
    /// assert_eq!(tree.accumulate(0, 2), Ok(7));
    /// ```
    pub fn from_fn(size: usize, identity: T, combine: C) -> Result<Self, Error> {
        Self::new(size, FnOperation::new(identity, combine))
    }
}

impl<O: Operation> SegmentTree<O> {
    /// Creates a tree of `size` identity elements
    ///
    /// Returns [Error::InvalidArgument] if `size` is zero.
    pub fn new(size: usize, op: O) -> Result<Self, Error> {
        check_size(size)?;
        let storage = (0..2 * size).map(|_| op.identity()).collect();
        log::debug!("created segment tree with {} leaves", size);
        Ok(Self {
            op,
            size,
            storage,
            #[cfg(feature = "profiler")]
            stats: Stats::default(),
        })
    }

    /// Creates a tree whose leaves are `values` in order
    ///
    /// Internal nodes are computed bottom-up in linear time.
    /// Returns [Error::InvalidArgument] if `values` is empty.
    pub fn from_values<I>(op: O, values: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = O::Value>,
    {
        let leaves: Vec<O::Value> = values.into_iter().collect();
        let size = leaves.len();
        check_size(size)?;

        let mut storage = Vec::with_capacity(2 * size);
        storage.extend((0..size).map(|_| op.identity()));
        storage.extend(leaves);
        for i in (1..size).rev() {
            storage[i] = op.combine(&storage[2 * i], &storage[2 * i + 1]);
        }
        log::debug!("built segment tree from {} leaves", size);

        Ok(Self {
            op,
            size,
            storage,
            #[cfg(feature = "profiler")]
            stats: Stats::default(),
        })
    }

    /// Returns the number of leaves
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the tree has no leaves
    ///
    /// Constructed trees always hold at least one leaf.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns a reference to the operation of the tree
    #[inline]
    pub fn operation(&self) -> &O {
        &self.op
    }

    /// Returns the leaves in element order
    #[inline]
    pub fn leaves(&self) -> &[O::Value] {
        &self.storage[self.size..]
    }

    /// Returns the value at index `i`
    #[inline]
    pub fn index(&self, i: usize) -> Result<&O::Value, Error> {
        check_index(i, self.size)?;
        Ok(&self.storage[self.size + i])
    }

    /// Overwrites the value at index `i` with `v` and refreshes its ancestors
    pub fn assign(&mut self, i: usize, v: O::Value) -> Result<(), Error> {
        check_index(i, self.size)?;
        profile_scope!(self.stats, Assign);

        let mut node = self.size + i;
        self.storage[node] = v;
        node /= 2;
        while node > 0 {
            self.storage[node] = self
                .op
                .combine(&self.storage[2 * node], &self.storage[2 * node + 1]);
            node /= 2;
        }
        log::trace!("segment tree assign at index {}", i);
        Ok(())
    }

    /// Returns the ordered fold of the elements at indices `[first, last]`
    ///
    /// Both endpoints must be valid indices. If `first > last` the range is empty and
    /// the identity is returned.
    pub fn accumulate(&self, first: usize, last: usize) -> Result<O::Value, Error> {
        check_index(first, self.size)?;
        check_index(last, self.size)?;
        profile_scope!(self.stats, Range);
        Ok(self.fold_between(first, last + 1))
    }

    /// Returns the ordered fold of the elements within `range`
    ///
    /// Empty ranges return the identity.
    ///
    /// ```
    /// use rangefold::{ops::Concat, SegmentTree};
    ///
    /// let letters = ["a", "b", "c", "d"].map(String::from);
    /// let tree = SegmentTree::from_values(Concat, letters).unwrap();
    /// assert_eq!(tree.combine_range(1..=2).unwrap(), "bc");
    /// assert_eq!(tree.combine_range(..).unwrap(), "abcd");
    /// ```
    pub fn combine_range<R>(&self, range: R) -> Result<O::Value, Error>
    where
        R: RangeBounds<usize>,
    {
        let bounds = into_inclusive(&range, self.size)?;
        profile_scope!(self.stats, Range);
        Ok(match bounds {
            Some((first, last)) => self.fold_between(first, last + 1),
            None => self.op.identity(),
        })
    }

    /// Returns the ordered fold of all elements
    #[inline]
    pub fn total(&self) -> O::Value {
        self.fold_between(0, self.size)
    }

    // Folds leaves in `[first, end)`. Nodes taken from the left are appended to `left`,
    // nodes taken from the right are prepended to `right`.
    fn fold_between(&self, first: usize, end: usize) -> O::Value {
        let mut left = self.op.identity();
        let mut right = self.op.identity();
        let mut l = first + self.size;
        let mut r = end + self.size;
        while l < r {
            if l & 1 == 1 {
                left = self.op.combine(&left, &self.storage[l]);
                l += 1;
            }
            if r & 1 == 1 {
                r -= 1;
                right = self.op.combine(&self.storage[r], &right);
            }
            l /= 2;
            r /= 2;
        }
        self.op.combine(&left, &right)
    }

    cfg_profiler! {
        /// Returns the per-operation latencies recorded by the tree
        pub fn stats(&self) -> &Stats {
            &self.stats
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{
        Concat,
        min_max::{I64Min, U32Max},
        sum::U64Sum,
    };

    #[test]
    fn min_scenario() {
        let min = |a: &f64, b: &f64| a.min(*b);
        let mut tree = SegmentTree::from_fn(4, f64::INFINITY, min).unwrap();
        tree.assign(0, 5.0).unwrap();
        tree.assign(1, 2.0).unwrap();
        tree.assign(2, 8.0).unwrap();
        tree.assign(3, 1.0).unwrap();
        assert_eq!(tree.accumulate(0, 3), Ok(1.0));
        assert_eq!(tree.accumulate(0, 1), Ok(2.0));

        tree.assign(3, 100.0).unwrap();
        assert_eq!(tree.accumulate(2, 3), Ok(8.0));
    }

    #[test]
    fn assign_overwrites() {
        let mut tree = SegmentTree::new(3, U64Sum).unwrap();
        tree.assign(1, 4).unwrap();
        tree.assign(1, 9).unwrap();
        assert_eq!(tree.index(1), Ok(&9));
        assert_eq!(tree.total(), 9);
    }

    #[test]
    fn root_matches_full_fold() {
        // Sizes that are not powers of two still keep node 1 as the fold of all leaves
        for size in 1..20 {
            let mut tree = SegmentTree::new(size, U64Sum).unwrap();
            let mut reference = vec![0u64; size];
            for _ in 0..50 {
                let i = fastrand::usize(0..size);
                let v = fastrand::u64(0..1000);
                tree.assign(i, v).unwrap();
                reference[i] = v;
                assert_eq!(tree.index(i), Ok(&v));
            }
            let expected: u64 = reference.iter().sum();
            if size > 1 {
                assert_eq!(tree.storage[1], expected);
            }
            assert_eq!(tree.total(), expected);
            assert_eq!(tree.leaves(), reference.as_slice());
        }
    }

    #[test]
    fn concat_preserves_order() {
        for size in 1..12 {
            let values: Vec<String> = (0..size)
                .map(|i| ((b'a' + i as u8) as char).to_string())
                .collect();
            let tree = SegmentTree::from_values(Concat, values.clone()).unwrap();
            for first in 0..size {
                for last in first..size {
                    let expected: String = values[first..=last].concat();
                    assert_eq!(tree.accumulate(first, last), Ok(expected));
                }
            }
            assert_eq!(tree.total(), values.concat());
        }
    }

    #[test]
    fn empty_range_is_identity() {
        let tree = SegmentTree::from_values(Concat, ["x", "y", "z"].map(String::from)).unwrap();
        assert_eq!(tree.accumulate(2, 1), Ok(String::new()));
        assert_eq!(tree.accumulate(2, 0), Ok(String::new()));
        assert_eq!(tree.combine_range(1..1), Ok(String::new()));
    }

    #[test]
    fn out_of_range_leaves_tree_unchanged() {
        let mut tree = SegmentTree::from_values(U32Max, [3, 9, 4]).unwrap();
        let before = tree.storage.clone();
        assert_eq!(
            tree.assign(3, 100),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(tree.index(5).unwrap_err().is_index_out_of_range());
        assert!(tree.accumulate(0, 3).unwrap_err().is_index_out_of_range());
        assert!(tree.accumulate(3, 1).unwrap_err().is_index_out_of_range());
        assert!(tree.combine_range(..4).unwrap_err().is_index_out_of_range());
        assert_eq!(tree.storage, before);
    }

    #[test]
    fn zero_size_rejected() {
        assert!(SegmentTree::new(0, I64Min).unwrap_err().is_invalid_argument());
        assert!(
            SegmentTree::from_values(I64Min, Vec::new())
                .unwrap_err()
                .is_invalid_argument()
        );
    }

    #[test]
    fn from_values_matches_assign() {
        let values: Vec<i64> = (0..23).map(|_| fastrand::i64(-500..500)).collect();
        let built = SegmentTree::from_values(I64Min, values.iter().copied()).unwrap();
        let mut assigned = SegmentTree::new(values.len(), I64Min).unwrap();
        for (i, v) in values.iter().enumerate() {
            assigned.assign(i, *v).unwrap();
        }
        assert_eq!(built.storage, assigned.storage);
        assert_eq!(built.len(), 23);
        assert!(!built.is_empty());
    }
}

#[cfg(all(test, feature = "profiler"))]
mod profiler_tests {
    use super::*;
    use crate::{ops::Concat, stats::OpKind};

    #[test]
    fn assign_and_range_counts() {
        let mut tree = SegmentTree::new(3, Concat).unwrap();
        for (i, v) in ["x", "y", "z"].into_iter().enumerate() {
            tree.assign(i, v.to_string()).unwrap();
        }
        assert_eq!(tree.accumulate(0, 2).unwrap(), "xyz");
        assert_eq!(tree.combine_range(1..).unwrap(), "yz");
        tree.index(1).unwrap();
        tree.total();
        assert!(tree.assign(3, String::new()).is_err());
        assert!(tree.accumulate(0, 3).is_err());

        let stats = tree.stats();
        assert_eq!(stats.count(OpKind::Assign), 3);
        assert_eq!(stats.count(OpKind::Range), 2);
        assert_eq!(stats.count(OpKind::Add), 0);
        assert_eq!(stats.summary(OpKind::Assign).count, 3);

        let out = format!("{stats:?}");
        assert!(out.contains("Assign: count=3"), "{out}");
        assert!(out.contains("Range: count=2"), "{out}");
    }
}
