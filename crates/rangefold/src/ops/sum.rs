use super::{InverseOperation, Operation};

macro_rules! int_sum_impl {
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
                a.wrapping_add(*b)
            }
        }

        impl InverseOperation for $struct {
            #[inline]
            fn inverse(&self, a: &Self::Value, b: &Self::Value) -> Self::Value {
                a.wrapping_sub(*b)
            }
        }
    };
}

macro_rules! float_sum_impl {
    ($struct:tt, $type:ty) => {
        #[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
        #[allow(missing_docs)]
        pub struct $struct;

        impl Operation for $struct {
            type Value = $type;

            #[inline]
            fn identity(&self) -> Self::Value {
                0.0
            }
            #[inline]
            fn combine(&self, a: &Self::Value, b: &Self::Value) -> Self::Value {
                a + b
            }
        }

        impl InverseOperation for $struct {
            #[inline]
            fn inverse(&self, a: &Self::Value, b: &Self::Value) -> Self::Value {
                a - b
            }
        }
    };
}

// Integer sums wrap on overflow so that subtraction stays an exact inverse.
int_sum_impl!(U8Sum, u8);
int_sum_impl!(U16Sum, u16);
int_sum_impl!(U32Sum, u32);
int_sum_impl!(U64Sum, u64);
int_sum_impl!(U128Sum, u128);
int_sum_impl!(UsizeSum, usize);
int_sum_impl!(I8Sum, i8);
int_sum_impl!(I16Sum, i16);
int_sum_impl!(I32Sum, i32);
int_sum_impl!(I64Sum, i64);
int_sum_impl!(I128Sum, i128);
int_sum_impl!(IsizeSum, isize);
float_sum_impl!(F32Sum, f32);
float_sum_impl!(F64Sum, f64);
