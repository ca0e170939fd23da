//! Host-side layout bookkeeping.
//!
//! - [`ShapeDescriptor`]: shape, strides and order tag of a tensor view, with
//!   the offset resolver and the effective stride.
//! - [`Addressing`]: the fast-path detector choosing between direct
//!   `index * stride` addressing and per-element offset resolution.

mod descriptor;
mod fast_path;

pub use descriptor::{Dims, Order, ShapeDescriptor, IRREGULAR_STRIDE};
pub use fast_path::{Addressing, fast_path_eligible};
