//! Transformations applied by the lambda kernels.
//!
//! A transformation is a zero-sized type implementing one of the `#[cube]`
//! traits below. Its body is expanded straight into the kernel, so the
//! per-element call costs nothing over a hand-written kernel. State the
//! transformation closes over travels as [`LambdaArgs`]: an ordered list of
//! scalars converted to the call's element type and bound to the kernel as a
//! read-only tensor. Every transformation declares through [`Captures`]
//! how many scalars it reads; calls with fewer are rejected on the host.

mod args;
pub mod builtin;

pub use args::{Lambda, LambdaArgs};

use cubecl::prelude::*;

/// Number of captured scalars a transformation reads from its args tensor.
///
/// The kernel indexes `args[0..ARGS]` unchecked, so every call must bind at
/// least `ARGS` captures.
pub trait Captures {
    const ARGS: usize;
}

/// `z[e] = f(x[e])`
#[cube]
pub trait UnaryLambda: 'static + Send + Sync {
    fn apply<E: Numeric>(x: Line<E>, args: &Tensor<Line<E>>) -> Line<E>;
}

/// `z[e] = f(e, x[e])`, with `e` the row-major logical index.
#[cube]
pub trait IndexedLambda: 'static + Send + Sync {
    fn apply<E: Numeric>(index: u32, x: Line<E>, args: &Tensor<Line<E>>) -> Line<E>;
}

/// `z[e] = f(x[e], y[e])`
#[cube]
pub trait PairwiseLambda: 'static + Send + Sync {
    fn apply<E: Numeric>(x: Line<E>, y: Line<E>, args: &Tensor<Line<E>>) -> Line<E>;
}

/// `z[e] = f(e, x[e], y[e])`
#[cube]
pub trait IndexedPairwiseLambda: 'static + Send + Sync {
    fn apply<E: Numeric>(index: u32, x: Line<E>, y: Line<E>, args: &Tensor<Line<E>>) -> Line<E>;
}

/// `z[e] = f(w[e], x[e], y[e])`
#[cube]
pub trait TriplewiseLambda: 'static + Send + Sync {
    fn apply<E: Numeric>(w: Line<E>, x: Line<E>, y: Line<E>, args: &Tensor<Line<E>>) -> Line<E>;
}
