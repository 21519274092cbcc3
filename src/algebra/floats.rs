use num_traits::{Float, FloatConst, FromPrimitive, NumAssign};

/// Trait for floating point types used in the proxip solver
///
/// Every floating point computation in the solver is generic over this
/// trait, with implementations supplied for the native `f32` and `f64`
/// types.  Other scalar types can be used provided they satisfy the
/// constituent bounds, most of which come from [num_traits](num_traits).

pub trait FloatT:
    'static
    + Send
    + Float
    + FloatConst
    + NumAssign
    + Default
    + FromPrimitive
    + std::fmt::Display
    + std::fmt::LowerExp
    + std::fmt::Debug
{
}
impl FloatT for f32 {}
impl FloatT for f64 {}

/// Trait for converting Rust primitives to [FloatT](crate::algebra::FloatT)
///
/// Conversion of primitive constants to the generic scalar type, written
/// `(0.5).as_T()` at use sites rather than the noisier
/// `T::from_f64(0.5).unwrap()`.  Implemented for the float and unsigned
/// integer primitives; used throughout the solver internals and by the
/// [settings](crate::solver::DefaultSettings) defaults.

#[allow(non_snake_case)]
pub trait AsFloatT<T>: 'static {
    fn as_T(&self) -> T;
}

macro_rules! impl_as_T {
    ($(($ty:ty, $via:ident)),*) => {$(
        impl<T> AsFloatT<T> for $ty
        where
            T: std::ops::Mul<T, Output = T> + FromPrimitive + 'static,
        {
            #[inline]
            fn as_T(&self) -> T {
                T::$via(*self).unwrap()
            }
        }
    )*};
}
impl_as_T!(
    (u32, from_u32),
    (u64, from_u64),
    (usize, from_usize),
    (f32, from_f32),
    (f64, from_f64)
);
