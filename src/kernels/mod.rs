//! GPU kernels for lambda operations.
//!
//! Every kernel walks the destination with a grid-stride loop over a fixed
//! grid: unit `u` handles `u, u + grid, u + 2 * grid, ...` below the
//! destination length. Addressing is chosen once per launch (see
//! [`Addressing`](crate::layout::Addressing)) and compiled in as a comptime
//! flag.
//!
//! Contains implementations of:
//! - Unary and unary-indexed application
//! - Pairwise application, including the scalar-operand form
//! - Indexed pairwise application
//! - Triplewise application

mod addressing;
mod indexed;
mod indexed_pairwise;
mod pairwise;
mod triplewise;
mod unary;

pub use addressing::{element_offset, resolve_offset};
pub use indexed::launch_indexed;
pub use indexed_pairwise::launch_indexed_pairwise;
pub use pairwise::{launch_pairwise, launch_pairwise_scalar};
pub use triplewise::launch_triplewise;
pub use unary::launch_unary;

use alloc::format;

use cubecl::Runtime;
use cubecl::std::tensor::TensorHandle;

use crate::error::{LambdaError, LambdaResult};
use crate::launch::GridConfig;
use crate::layout::ShapeDescriptor;

/// A tensor taking part in a launch: its device handle and its layout.
///
/// The handle's shape and strides must describe the same view as `layout`.
#[derive(Clone, Copy)]
pub struct Operand<'a, R: Runtime> {
    pub handle: &'a TensorHandle<R>,
    pub layout: &'a ShapeDescriptor,
}

impl<'a, R: Runtime> Operand<'a, R> {
    pub fn new(handle: &'a TensorHandle<R>, layout: &'a ShapeDescriptor) -> Self {
        Self { handle, layout }
    }

    /// Effective stride as a kernel scalar.
    pub(crate) fn stride_arg(&self) -> LambdaResult<u32> {
        to_u32(self.layout.effective_stride(), "effective stride")
    }

    /// Rejects views the kernels cannot index with 32-bit offsets.
    pub(crate) fn check_addressable(&self) -> LambdaResult<()> {
        to_u32(self.layout.required_len(), "addressable length").map(|_| ())
    }
}

pub(crate) fn to_u32(value: usize, what: &str) -> LambdaResult<u32> {
    u32::try_from(value)
        .map_err(|_| LambdaError::shape(format!("{what} {value} exceeds the 32-bit index range")))
}

/// Validates the operands of a launch and returns the destination length.
pub(crate) fn launch_length<R: Runtime>(
    grid: &GridConfig,
    target: &Operand<'_, R>,
    sources: &[&Operand<'_, R>],
) -> LambdaResult<u32> {
    target.check_addressable()?;
    for source in sources {
        source.check_addressable()?;
    }
    grid_stride_length(grid, target.layout.length())
}

/// Length as a kernel scalar, bounded so that `e + grid_size` cannot wrap
/// in the grid-stride loop.
pub(crate) fn grid_stride_length(grid: &GridConfig, length: usize) -> LambdaResult<u32> {
    let length = to_u32(length, "length")?;
    if length as u64 + grid.total_units() > u32::MAX as u64 {
        return Err(LambdaError::shape(format!(
            "length {length} plus {} grid units exceeds the 32-bit index range",
            grid.total_units()
        )));
    }
    Ok(length)
}
