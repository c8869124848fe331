use super::Operation;

#[inline]
fn min<T: PartialOrd + Copy>(a: T, b: T) -> T {
    if b < a { b } else { a }
}

#[inline]
fn max<T: PartialOrd + Copy>(a: T, b: T) -> T {
    if b > a { b } else { a }
}

macro_rules! min_max_impl {
    ($min:tt, $max:tt, $type:ty, $lowest:expr, $highest:expr) => {
        #[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
        #[allow(missing_docs)]
        pub struct $min;

        impl Operation for $min {
            type Value = $type;

            #[inline]
            fn identity(&self) -> Self::Value {
                $highest
            }
            #[inline]
            fn combine(&self, a: &Self::Value, b: &Self::Value) -> Self::Value {
                min(*a, *b)
            }
        }

        #[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
        #[allow(missing_docs)]
        pub struct $max;

        impl Operation for $max {
            type Value = $type;

            #[inline]
            fn identity(&self) -> Self::Value {
                $lowest
            }
            #[inline]
            fn combine(&self, a: &Self::Value, b: &Self::Value) -> Self::Value {
                max(*a, *b)
            }
        }
    };
    ($min:tt, $max:tt, $type:ty) => {
        min_max_impl!($min, $max, $type, <$type>::MIN, <$type>::MAX);
    };
}

min_max_impl!(U8Min, U8Max, u8);
min_max_impl!(U16Min, U16Max, u16);
min_max_impl!(U32Min, U32Max, u32);
min_max_impl!(U64Min, U64Max, u64);
min_max_impl!(U128Min, U128Max, u128);
min_max_impl!(UsizeMin, UsizeMax, usize);
min_max_impl!(I8Min, I8Max, i8);
min_max_impl!(I16Min, I16Max, i16);
min_max_impl!(I32Min, I32Max, i32);
min_max_impl!(I64Min, I64Max, i64);
min_max_impl!(I128Min, I128Max, i128);
min_max_impl!(IsizeMin, IsizeMax, isize);
min_max_impl!(F32Min, F32Max, f32, f32::NEG_INFINITY, f32::INFINITY);
min_max_impl!(F64Min, F64Max, f64, f64::NEG_INFINITY, f64::INFINITY);
