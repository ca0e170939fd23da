//! # CubeK Lambda
//!
//! Generic elementwise transformation kernels for GPU tensors.
//!
//! A caller supplies a transformation (a `#[cube]` type plus the scalars it
//! captures) and a destination array; the crate applies the transformation
//! to every element in parallel.
//!
//! ## Features
//!
//! - Five kernel variants: unary, unary-indexed, pairwise (with scalar
//!   broadcast), indexed-pairwise and triplewise
//! - Arbitrary strided views, with a direct-addressing fast path when every
//!   view walks its memory uniformly
//! - One type dispatch per call over a closed set of element types
//! - Fixed, explicit execution grid with grid-stride coverage of any length
//!
//! ## Example
//!
//! ```ignore
//! use cubek_lambda::{Lambda, LambdaArray, builtin::Sub};
//!
//! let x = LambdaArray::<R>::from_data(&client, &[4], &[1.0f32, 2.0, 3.0, 4.0])?;
//! let ten = LambdaArray::<R>::from_data(&client, &[1], &[10.0f32])?;
//! let mut z = LambdaArray::<R>::zeros(&client, &[4], DType::F32);
//!
//! x.apply_pairwise_lambda(&client, &Lambda::<Sub>::new(), &ten, &mut z, None)?;
//! assert_eq!(z.to_data::<f32>(&client)?, [-9.0, -8.0, -7.0, -6.0]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod array;
pub mod dtype;
pub mod error;
pub mod kernels;
pub mod lambda;
pub mod launch;
pub mod layout;

pub use half;

pub use array::LambdaArray;
pub use dtype::{DType, LambdaElement};
pub use error::{LambdaError, LambdaOp, LambdaResult};
pub use lambda::{
    Captures, IndexedLambda, IndexedPairwiseLambda, Lambda, LambdaArgs, PairwiseLambda, TriplewiseLambda,
    UnaryLambda, builtin,
};
pub use launch::{GridConfig, LambdaLauncher};
pub use layout::{Addressing, Order, ShapeDescriptor};
