//! Unary lambda kernel.
//!
//! Computes `z[e] = f(x[e])`.

use alloc::format;

use cubecl::prelude::*;
use cubecl::Runtime;
use cubecl::client::ComputeClient;
use cubecl::std::tensor::TensorHandle;

use super::{Operand, element_offset, launch_length};
use crate::dtype::LambdaElement;
use crate::error::{LambdaError, LambdaOp, LambdaResult};
use crate::lambda::UnaryLambda;
use crate::launch::GridConfig;
use crate::layout::Addressing;

/// Launches the unary kernel on `grid`.
///
/// Returns once the kernel is queued; the caller owns the sync.
pub fn launch_unary<R: Runtime, E: LambdaElement, L: UnaryLambda>(
    client: &ComputeClient<R>,
    grid: &GridConfig,
    x: Operand<'_, R>,
    z: Operand<'_, R>,
    args: &TensorHandle<R>,
    addressing: Addressing,
) -> LambdaResult<()> {
    let length = launch_length(grid, &z, &[&x])?;
    if length == 0 {
        return Ok(());
    }

    unsafe {
        unary_kernel::launch_unchecked::<L, R>(
            client,
            grid.cube_count(),
            grid.cube_dim(),
            x.handle.as_arg(1),
            z.handle.as_arg(1),
            args.as_arg(1),
            ScalarArg::new(x.stride_arg()?),
            ScalarArg::new(z.stride_arg()?),
            ScalarArg::new(length),
            addressing.is_direct(),
            E::as_type_native_unchecked(),
        )
        .map_err(|e| LambdaError::launch(LambdaOp::Apply, format!("unary kernel failed: {:?}", e)))
    }
}

#[cube(launch_unchecked)]
fn unary_kernel<E: Numeric, L: UnaryLambda>(
    x: &Tensor<Line<E>>,
    z: &mut Tensor<Line<E>>,
    args: &Tensor<Line<E>>,
    x_stride: u32,
    z_stride: u32,
    length: u32,
    #[comptime] direct: bool,
    #[define(E)] _dtype: StorageType,
) {
    let grid_size = CUBE_COUNT * CUBE_DIM;
    let mut e = CUBE_POS * CUBE_DIM + UNIT_POS;

    while e < length {
        let x_offset = element_offset::<E>(x, e, x_stride, direct);
        let z_offset = element_offset::<E>(z, e, z_stride, direct);

        z[z_offset] = L::apply::<E>(x[x_offset], args);
        e += grid_size;
    }
}
