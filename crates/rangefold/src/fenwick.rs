use crate::{
    Error,
    error::{check_index, check_size},
    into_inclusive,
    ops::{FnOperation, InverseOperation, Operation},
};
use core::ops::RangeBounds;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[cfg(feature = "profiler")]
use crate::stats::Stats;

/// Returns the lowest set bit of `i`
#[inline]
const fn lowbit(i: usize) -> usize {
    i & i.wrapping_neg()
}

/// A binary indexed tree over an associative [Operation]
///
/// Logical elements are indexed from `0` to `len() - 1` and start out as the identity.
/// Updates fold a delta into an element through `combine`; they never overwrite it.
/// Point reads, replacement and two-sided range folds require an [InverseOperation]
/// and are not available otherwise.
///
/// Since prefixes are assembled from partial folds in an order that does not follow the
/// element order, the operation should be commutative. Order-sensitive folds belong in a
/// [SegmentTree](crate::SegmentTree).
///
/// # Example
///
/// ```
/// use rangefold::{ops::sum::I64Sum, Fenwick};
///
/// let mut tree = Fenwick::from_values(I64Sum, [1, 2, 3, 4, 5]).unwrap();
/// assert_eq!(tree.accumulate_prefix(4), Ok(15));
/// assert_eq!(tree.get(2), Ok(3));
///
/// tree.replace(2, 10).unwrap();
/// assert_eq!(tree.get(2), Ok(10));
/// assert_eq!(tree.accumulate_prefix(4), Ok(22));
/// ```
#[derive(Clone, Debug)]
pub struct Fenwick<O: Operation> {
    op: O,
    // 1-indexed partial folds; slot 0 is an unused sentinel
    storage: Vec<O::Value>,
    #[cfg(feature = "profiler")]
    stats: Stats,
}

impl<T, C> Fenwick<FnOperation<T, C>>
where
    T: Clone,
    C: Fn(&T, &T) -> T,
{
    /// Creates a tree from an identity element and a combine function
    ///
    /// The resulting tree has no inverse. Use [Fenwick::new] with
    /// [FnOperation::with_inverse] to enable inverse-dependent queries.
    pub fn from_fn(size: usize, identity: T, combine: C) -> Result<Self, Error> {
        Self::new(size, FnOperation::new(identity, combine))
    }
}

impl<O: Operation> Fenwick<O> {
    /// Creates a tree of `size` identity elements
    ///
    /// Returns [Error::InvalidArgument] if `size` is zero.
    pub fn new(size: usize, op: O) -> Result<Self, Error> {
        check_size(size)?;
        let storage = (0..=size).map(|_| op.identity()).collect();
        log::debug!("created fenwick tree with {} elements", size);
        Ok(Self {
            op,
            storage,
            #[cfg(feature = "profiler")]
            stats: Stats::default(),
        })
    }

    /// Creates a tree whose elements are `values` in order
    ///
    /// For commutative operations the result equals calling [Fenwick::add] for every value
    /// on a fresh tree. Order-sensitive operations end up with a different element order.
    /// Returns [Error::InvalidArgument] if `values` is empty.
    pub fn from_values<I>(op: O, values: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = O::Value>,
    {
        let mut storage = Vec::with_capacity(1);
        storage.push(op.identity());
        storage.extend(values);
        let size = storage.len() - 1;
        check_size(size)?;

        // Push every partial fold into its parent. Parents always follow their children.
        for i in 1..=size {
            let parent = i + lowbit(i);
            if parent <= size {
                let folded = op.combine(&storage[parent], &storage[i]);
                storage[parent] = folded;
            }
        }
        log::debug!("built fenwick tree from {} elements", size);

        Ok(Self {
            op,
            storage,
            #[cfg(feature = "profiler")]
            stats: Stats::default(),
        })
    }

    /// Returns the number of logical elements
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len() - 1
    }

    /// Returns `true` if the tree has no elements
    ///
    /// Constructed trees always hold at least one element.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a reference to the operation of the tree
    #[inline]
    pub fn operation(&self) -> &O {
        &self.op
    }

    /// Folds `v` into the element at index `i`
    ///
    /// Repeated calls accumulate: the element becomes `combine(element, v)`.
    pub fn add(&mut self, i: usize, v: O::Value) -> Result<(), Error> {
        check_index(i, self.len())?;
        profile_scope!(self.stats, Add);
        self.fold_in(i, &v);
        log::trace!("fenwick add at index {}", i);
        Ok(())
    }

    /// Returns the fold of the elements at indices `[0, len]`
    ///
    /// Note that `len` is inclusive: `accumulate_prefix(0)` returns the first element.
    pub fn accumulate_prefix(&self, len: usize) -> Result<O::Value, Error> {
        check_index(len, self.len())?;
        profile_scope!(self.stats, Prefix);
        Ok(self.prefix(len + 1))
    }

    /// Returns the fold of every element in the tree
    #[inline]
    pub fn total(&self) -> O::Value {
        self.prefix(self.len())
    }

    // Folds `v` into every node covering index `i`, which is known to be in range.
    fn fold_in(&mut self, i: usize, v: &O::Value) {
        let size = self.len();
        let mut node = i + 1;
        while node <= size {
            let folded = self.op.combine(&self.storage[node], v);
            self.storage[node] = folded;
            node += lowbit(node);
        }
    }

    // Folds the first `count` elements, `count <= len()`.
    #[inline]
    fn prefix(&self, mut count: usize) -> O::Value {
        let mut acc = self.op.identity();
        while count > 0 {
            acc = self.op.combine(&acc, &self.storage[count]);
            count -= lowbit(count);
        }
        acc
    }

    cfg_profiler! {
        /// Returns the per-operation latencies recorded by the tree
        pub fn stats(&self) -> &Stats {
            &self.stats
        }
    }
}

impl<O: InverseOperation> Fenwick<O> {
    /// Returns the fold of the elements at indices `[l, r]`
    ///
    /// Both endpoints must be valid indices. If `l > r` the range is empty and the
    /// identity is returned.
    pub fn accumulate(&self, l: usize, r: usize) -> Result<O::Value, Error> {
        check_index(l, self.len())?;
        check_index(r, self.len())?;
        profile_scope!(self.stats, Range);
        Ok(self.fold_between(l, r))
    }

    /// Returns the fold of the elements within `range`
    ///
    /// Empty ranges return the identity.
    ///
    /// ```
    /// use rangefold::{ops::sum::U32Sum, Fenwick};
    ///
    /// let tree = Fenwick::from_values(U32Sum, [3, 1, 4, 1, 5]).unwrap();
    /// assert_eq!(tree.combine_range(1..4), Ok(6));
    /// assert_eq!(tree.combine_range(..), Ok(14));
    /// assert_eq!(tree.combine_range(2..2), Ok(0));
    /// ```
    pub fn combine_range<R>(&self, range: R) -> Result<O::Value, Error>
    where
        R: RangeBounds<usize>,
    {
        let bounds = into_inclusive(&range, self.len())?;
        profile_scope!(self.stats, Range);
        Ok(match bounds {
            Some((l, r)) => self.fold_between(l, r),
            None => self.op.identity(),
        })
    }

    /// Returns the current value of the element at index `i`
    pub fn get(&self, i: usize) -> Result<O::Value, Error> {
        check_index(i, self.len())?;
        profile_scope!(self.stats, Get);
        Ok(self.fold_between(i, i))
    }

    /// Overwrites the element at index `i` with `v`
    pub fn replace(&mut self, i: usize, v: O::Value) -> Result<(), Error> {
        check_index(i, self.len())?;
        profile_scope!(self.stats, Replace);
        let current = self.fold_between(i, i);
        let delta = self.op.inverse(&v, &current);
        self.fold_in(i, &delta);
        log::trace!("fenwick replace at index {}", i);
        Ok(())
    }

    // Both indices are known to be in range.
    fn fold_between(&self, l: usize, r: usize) -> O::Value {
        if l > r {
            self.op.identity()
        } else if l == 0 {
            self.prefix(r + 1)
        } else {
            self.op.inverse(&self.prefix(r + 1), &self.prefix(l))
        }
    }
}
