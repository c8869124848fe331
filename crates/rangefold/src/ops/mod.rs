use core::fmt;

/// String concatenation, an order-sensitive operation
pub mod concat;
/// Bitwise XOR, a self-inverse operation
pub mod xor;
/// MIN and MAX operations
pub mod min_max;
/// SUM operations with subtraction as inverse
pub mod sum;

pub use concat::Concat;

/// Associative operation with an identity element that the range structures fold with
///
/// Implementations must satisfy the following laws, which the structures rely on
/// but cannot verify:
///
/// - `combine(combine(a, b), c) == combine(a, combine(b, c))`
/// - `combine(identity(), a) == combine(a, identity()) == a`
///
/// Operations should be pure. Breaking these laws produces unspecified (but memory safe) results.
///
/// # Example
///
/// Here is a simple example of a product operation over `u64`.
/// ```
/// use rangefold::{Operation, SegmentTree};
///
/// #[derive(Default, Debug, Clone, Copy)]
/// struct Product;
///
/// impl Operation for Product {
///     type Value = u64;
///
///     fn identity(&self) -> Self::Value {
///         1
///     }
///
///     fn combine(&self, a: &Self::Value, b: &Self::Value) -> Self::Value {
///         a * b
///     }
/// }
///
/// let tree = SegmentTree::from_values(Product, [2, 3, 4]).unwrap();
/// assert_eq!(tree.accumulate(0, 2), Ok(24));
/// ```
pub trait Operation {
    /// Element type that is folded
    type Value: Clone;

    /// Returns the identity element of the operation
    ///
    /// For example, for SUM operations the identity is 0.
    fn identity(&self) -> Self::Value;

    /// Combines two values, with `a` preceding `b`
    fn combine(&self, a: &Self::Value, b: &Self::Value) -> Self::Value;

    /// Folds a sequence of values in order, starting from the identity
    #[inline]
    fn fold<'a, I>(&self, values: I) -> Self::Value
    where
        I: IntoIterator<Item = &'a Self::Value>,
        Self::Value: 'a,
    {
        values
            .into_iter()
            .fold(self.identity(), |acc, v| self.combine(&acc, v))
    }
}

/// Extension trait for operations that can undo a combination
///
/// Implementations must satisfy `inverse(combine(a, b), b) == a`. Range queries over
/// prefix folds are only correct when the operation is also commutative (i.e., a group
/// like addition and subtraction).
pub trait InverseOperation: Operation {
    /// Removes `b` from `a`
    fn inverse(&self, a: &Self::Value, b: &Self::Value) -> Self::Value;
}

impl<O: Operation + ?Sized> Operation for &O {
    type Value = O::Value;

    #[inline]
    fn identity(&self) -> Self::Value {
        (**self).identity()
    }
    #[inline]
    fn combine(&self, a: &Self::Value, b: &Self::Value) -> Self::Value {
        (**self).combine(a, b)
    }
}

impl<O: InverseOperation + ?Sized> InverseOperation for &O {
    #[inline]
    fn inverse(&self, a: &Self::Value, b: &Self::Value) -> Self::Value {
        (**self).inverse(a, b)
    }
}

/// Marker for an [FnOperation] that has no inverse
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoInverse;

/// An operation built from an identity value and caller supplied closures
///
/// Any `Fn(&T, &T) -> T` works, including free functions and closures that capture state.
/// The operation only implements [InverseOperation] once an inverse has been attached
/// through [FnOperation::with_inverse].
///
/// ```
/// use rangefold::{Fenwick, FnOperation};
///
/// let add = FnOperation::new(0i64, |a: &i64, b: &i64| a + b)
///     .with_inverse(|a: &i64, b: &i64| a - b);
/// let mut tree = Fenwick::new(4, add).unwrap();
/// tree.add(1, 5).unwrap();
/// tree.add(3, 2).unwrap();
/// assert_eq!(tree.accumulate(1, 2), Ok(5));
/// ```
#[derive(Clone, Copy)]
pub struct FnOperation<T, C, I = NoInverse> {
    identity: T,
    combine: C,
    inverse: I,
}

impl<T, C> FnOperation<T, C, NoInverse>
where
    T: Clone,
    C: Fn(&T, &T) -> T,
{
    /// Creates an operation from its identity element and combine function
    pub fn new(identity: T, combine: C) -> Self {
        Self {
            identity,
            combine,
            inverse: NoInverse,
        }
    }

    /// Attaches an inverse function
    pub fn with_inverse<I>(self, inverse: I) -> FnOperation<T, C, I>
    where
        I: Fn(&T, &T) -> T,
    {
        FnOperation {
            identity: self.identity,
            combine: self.combine,
            inverse,
        }
    }
}

impl<T: fmt::Debug, C, I> fmt::Debug for FnOperation<T, C, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOperation")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl<T, C, I> Operation for FnOperation<T, C, I>
where
    T: Clone,
    C: Fn(&T, &T) -> T,
{
    type Value = T;

    #[inline]
    fn identity(&self) -> T {
        self.identity.clone()
    }
    #[inline]
    fn combine(&self, a: &T, b: &T) -> T {
        (self.combine)(a, b)
    }
}

impl<T, C, I> InverseOperation for FnOperation<T, C, I>
where
    T: Clone,
    C: Fn(&T, &T) -> T,
    I: Fn(&T, &T) -> T,
{
    #[inline]
    fn inverse(&self, a: &T, b: &T) -> T {
        (self.inverse)(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fn_operation_captures_context() {
        let modulus = 7u32;
        let op = FnOperation::new(0u32, move |a: &u32, b: &u32| (a + b) % modulus)
            .with_inverse(move |a: &u32, b: &u32| (a + modulus - b) % modulus);
        assert_eq!(op.combine(&5, &4), 2);
        assert_eq!(op.inverse(&op.combine(&5, &4), &4), 5);
        assert_eq!(op.identity(), 0);
    }

    #[test]
    fn fold_in_order() {
        let op = FnOperation::new(Vec::new(), |a: &Vec<u8>, b: &Vec<u8>| {
            let mut out = a.clone();
            out.extend_from_slice(b);
            out
        });
        let values = [vec![1], vec![2, 3], vec![], vec![4]];
        assert_eq!(op.fold(&values), vec![1, 2, 3, 4]);
        assert_eq!(op.fold(&[]), Vec::<u8>::new());
    }

    #[test]
    fn borrowed_operation() {
        let op = sum::I32Sum;
        let borrowed = &op;
        assert_eq!(borrowed.combine(&2, &3), 5);
        assert_eq!(borrowed.inverse(&5, &3), 2);
    }
}
