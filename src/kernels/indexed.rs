//! Unary-indexed lambda kernel.
//!
//! Computes `z[e] = f(e, x[e])`, exposing the row-major logical index.

use alloc::format;

use cubecl::prelude::*;
use cubecl::Runtime;
use cubecl::client::ComputeClient;
use cubecl::std::tensor::TensorHandle;

use super::{Operand, element_offset, launch_length};
use crate::dtype::LambdaElement;
use crate::error::{LambdaError, LambdaOp, LambdaResult};
use crate::lambda::IndexedLambda;
use crate::launch::GridConfig;
use crate::layout::Addressing;

/// Launches the unary-indexed kernel on `grid`.
pub fn launch_indexed<R: Runtime, E: LambdaElement, L: IndexedLambda>(
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
        indexed_kernel::launch_unchecked::<L, R>(
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
        .map_err(|e| {
            LambdaError::launch(LambdaOp::ApplyIndexed, format!("indexed kernel failed: {:?}", e))
        })
    }
}

#[cube(launch_unchecked)]
fn indexed_kernel<E: Numeric, L: IndexedLambda>(
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

        z[z_offset] = L::apply::<E>(e, x[x_offset], args);
        e += grid_size;
    }
}
