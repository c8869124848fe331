use super::{InverseOperation, Operation};

macro_rules! xor_impl {
    ($struct:tt, $type:ty) => {
        #[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
        #[allow(missing_docs)]
        pub struct $struct;

        impl Operation for $struct {
            type Value = $type;

            #[inline]
            fn identity(&self) -> Self::Value {
                0
            }
            #[inline]
            fn combine(&self, a: &Self::Value, b: &Self::Value) -> Self::Value {
                a ^ b
            }
        }

        impl InverseOperation for $struct {
            #[inline]
            fn inverse(&self, a: &Self::Value, b: &Self::Value) -> Self::Value {
                a ^ b
            }
        }
    };
}

xor_impl!(U8Xor, u8);
xor_impl!(U16Xor, u16);
xor_impl!(U32Xor, u32);
xor_impl!(U64Xor, u64);
xor_impl!(U128Xor, u128);
xor_impl!(UsizeXor, usize);
xor_impl!(I32Xor, i32);
xor_impl!(I64Xor, i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_inverse() {
        let op = U64Xor;
        let a = 0b1011;
        let b = 0b0110;
        assert_eq!(op.combine(&a, &b), 0b1101);
        assert_eq!(op.inverse(&op.combine(&a, &b), &b), a);
        assert_eq!(op.fold(&[a, b, a]), b);
    }
}
