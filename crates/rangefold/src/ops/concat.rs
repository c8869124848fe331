use super::Operation;

#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Concatenates strings in order
///
/// Identity is the empty string. The operation is associative but not commutative,
/// which makes it useful for checking that folds preserve element order.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Concat;

impl Operation for Concat {
    type Value = String;

    #[inline]
    fn identity(&self) -> Self::Value {
        String::new()
    }

    #[inline]
    fn combine(&self, a: &Self::Value, b: &Self::Value) -> Self::Value {
        let mut out = String::with_capacity(a.len() + b.len());
        out.push_str(a);
        out.push_str(b);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_preserved() {
        let values = ["a", "b", "c"].map(String::from);
        assert_eq!(Concat.fold(&values), "abc");
        assert_eq!(Concat.combine(&values[2], &values[0]), "ca");
        assert_eq!(Concat.fold(&[]), "");
    }
}
