//! Link between Rust element types and [`DType`] tags.

use cubecl::prelude::*;
use half::{bf16, f16};

use super::DType;

/// Element types the lambda kernels are compiled for.
///
/// Captured lambda arguments travel as `f64` and are narrowed with
/// [`from_f64`](LambdaElement::from_f64) once the call's type is known.
pub trait LambdaElement: CubeElement + CubePrimitive + Numeric + Copy + Send + Sync + 'static {
    /// The tag for this Rust type.
    const DTYPE: DType;

    fn from_f64(value: f64) -> Self;

    fn to_f64(self) -> f64;
}

macro_rules! impl_primitive_element {
    ($ty:ty, $dtype:expr) => {
        impl LambdaElement for $ty {
            const DTYPE: DType = $dtype;

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $ty
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_primitive_element!(f64, DType::F64);
impl_primitive_element!(f32, DType::F32);
impl_primitive_element!(i64, DType::I64);
impl_primitive_element!(i32, DType::I32);
impl_primitive_element!(i16, DType::I16);
impl_primitive_element!(i8, DType::I8);
impl_primitive_element!(u64, DType::U64);
impl_primitive_element!(u32, DType::U32);
impl_primitive_element!(u16, DType::U16);
impl_primitive_element!(u8, DType::U8);

impl LambdaElement for f16 {
    const DTYPE: DType = DType::F16;

    #[inline]
    fn from_f64(value: f64) -> Self {
        f16::from_f64(value)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f16::to_f64(self)
    }
}

impl LambdaElement for bf16 {
    const DTYPE: DType = DType::BF16;

    #[inline]
    fn from_f64(value: f64) -> Self {
        bf16::from_f64(value)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        bf16::to_f64(self)
    }
}
