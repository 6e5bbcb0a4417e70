use std::fmt::Display;
use std::iter::Sum;

use conv::ApproxFrom;
use ndarray::{LinalgScalar, ScalarOperand};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Floating-point number trait, it is implemented for [f32] and [f64] only
pub trait Float:
    nalgebra::RealField
    + LinalgScalar
    + ScalarOperand
    + num_traits::FromPrimitive
    + ApproxFrom<usize>
    + ApproxFrom<f64>
    + Sum
    + Serialize
    + DeserializeOwned
    + Display
    + Send
    + Sync
    + 'static
{
    fn to_radians(self) -> Self;
}

macro_rules! float_impl {
    ($t:ty) => {
        impl Float for $t {
            #[inline]
            fn to_radians(self) -> Self {
                <$t>::to_radians(self)
            }
        }
    };
}

float_impl!(f32);
float_impl!(f64);
