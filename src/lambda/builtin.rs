//! Ready-made transformations.
//!
//! `c0`, `c1` denote the first and second captured scalars of the call.

use cubecl::prelude::*;

use super::{
    Captures, IndexedLambda, IndexedPairwiseLambda, PairwiseLambda, TriplewiseLambda, UnaryLambda,
};

macro_rules! captures {
    ($($lambda:ty => $args:expr),* $(,)?) => {
        $(
            impl Captures for $lambda {
                const ARGS: usize = $args;
            }
        )*
    };
}

captures! {
    Identity => 0,
    Square => 0,
    Scale => 1,
    Shift => 1,
    Affine => 2,
    IndexValue => 0,
    IndexShift => 0,
    Add => 0,
    Sub => 0,
    ReverseSub => 0,
    Mul => 0,
    Axpy => 1,
    IndexedAdd => 0,
    IndexedMulShift => 1,
    Sum3 => 0,
    Fma => 0,
    Lerp => 0,
}

/// `x`
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

/// `x * x`
#[derive(Debug, Clone, Copy, Default)]
pub struct Square;

/// `x * c0`
#[derive(Debug, Clone, Copy, Default)]
pub struct Scale;

/// `x + c0`
#[derive(Debug, Clone, Copy, Default)]
pub struct Shift;

/// `x * c0 + c1`
#[derive(Debug, Clone, Copy, Default)]
pub struct Affine;

#[cube]
impl UnaryLambda for Identity {
    fn apply<E: Numeric>(x: Line<E>, _args: &Tensor<Line<E>>) -> Line<E> {
        x
    }
}

#[cube]
impl UnaryLambda for Square {
    fn apply<E: Numeric>(x: Line<E>, _args: &Tensor<Line<E>>) -> Line<E> {
        x * x
    }
}

#[cube]
impl UnaryLambda for Scale {
    fn apply<E: Numeric>(x: Line<E>, args: &Tensor<Line<E>>) -> Line<E> {
        x * args[0]
    }
}

#[cube]
impl UnaryLambda for Shift {
    fn apply<E: Numeric>(x: Line<E>, args: &Tensor<Line<E>>) -> Line<E> {
        x + args[0]
    }
}

#[cube]
impl UnaryLambda for Affine {
    fn apply<E: Numeric>(x: Line<E>, args: &Tensor<Line<E>>) -> Line<E> {
        x * args[0] + args[1]
    }
}

/// `e`, ignoring the source value.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexValue;

/// `x + e`
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexShift;

#[cube]
impl IndexedLambda for IndexValue {
    fn apply<E: Numeric>(index: u32, _x: Line<E>, _args: &Tensor<Line<E>>) -> Line<E> {
        Line::new(E::cast_from(index))
    }
}

#[cube]
impl IndexedLambda for IndexShift {
    fn apply<E: Numeric>(index: u32, x: Line<E>, _args: &Tensor<Line<E>>) -> Line<E> {
        x + Line::new(E::cast_from(index))
    }
}

/// `x + y`
#[derive(Debug, Clone, Copy, Default)]
pub struct Add;

/// `x - y`
#[derive(Debug, Clone, Copy, Default)]
pub struct Sub;

/// `y - x`
#[derive(Debug, Clone, Copy, Default)]
pub struct ReverseSub;

/// `x * y`
#[derive(Debug, Clone, Copy, Default)]
pub struct Mul;

/// `c0 * x + y`
#[derive(Debug, Clone, Copy, Default)]
pub struct Axpy;

#[cube]
impl PairwiseLambda for Add {
    fn apply<E: Numeric>(x: Line<E>, y: Line<E>, _args: &Tensor<Line<E>>) -> Line<E> {
        x + y
    }
}

#[cube]
impl PairwiseLambda for Sub {
    fn apply<E: Numeric>(x: Line<E>, y: Line<E>, _args: &Tensor<Line<E>>) -> Line<E> {
        x - y
    }
}

#[cube]
impl PairwiseLambda for ReverseSub {
    fn apply<E: Numeric>(x: Line<E>, y: Line<E>, _args: &Tensor<Line<E>>) -> Line<E> {
        y - x
    }
}

#[cube]
impl PairwiseLambda for Mul {
    fn apply<E: Numeric>(x: Line<E>, y: Line<E>, _args: &Tensor<Line<E>>) -> Line<E> {
        x * y
    }
}

#[cube]
impl PairwiseLambda for Axpy {
    fn apply<E: Numeric>(x: Line<E>, y: Line<E>, args: &Tensor<Line<E>>) -> Line<E> {
        args[0] * x + y
    }
}

/// `x + y + e`
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexedAdd;

/// `e * c0 + x * y`
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexedMulShift;

#[cube]
impl IndexedPairwiseLambda for IndexedAdd {
    fn apply<E: Numeric>(index: u32, x: Line<E>, y: Line<E>, _args: &Tensor<Line<E>>) -> Line<E> {
        x + y + Line::new(E::cast_from(index))
    }
}

#[cube]
impl IndexedPairwiseLambda for IndexedMulShift {
    fn apply<E: Numeric>(index: u32, x: Line<E>, y: Line<E>, args: &Tensor<Line<E>>) -> Line<E> {
        Line::new(E::cast_from(index)) * args[0] + x * y
    }
}

/// `w + x + y`
#[derive(Debug, Clone, Copy, Default)]
pub struct Sum3;

/// `w * x + y`
#[derive(Debug, Clone, Copy, Default)]
pub struct Fma;

/// `w + y * (x - w)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Lerp;

#[cube]
impl TriplewiseLambda for Sum3 {
    fn apply<E: Numeric>(w: Line<E>, x: Line<E>, y: Line<E>, _args: &Tensor<Line<E>>) -> Line<E> {
        w + x + y
    }
}

#[cube]
impl TriplewiseLambda for Fma {
    fn apply<E: Numeric>(w: Line<E>, x: Line<E>, y: Line<E>, _args: &Tensor<Line<E>>) -> Line<E> {
        w * x + y
    }
}

#[cube]
impl TriplewiseLambda for Lerp {
    fn apply<E: Numeric>(w: Line<E>, x: Line<E>, y: Line<E>, _args: &Tensor<Line<E>>) -> Line<E> {
        w + y * (x - w)
    }
}
