//! Triplewise lambda kernel.
//!
//! Computes `z[e] = f(w[e], x[e], y[e])`.

use alloc::format;

use cubecl::prelude::*;
use cubecl::Runtime;
use cubecl::client::ComputeClient;
use cubecl::std::tensor::TensorHandle;

use super::{Operand, element_offset, launch_length};
use crate::dtype::LambdaElement;
use crate::error::{LambdaError, LambdaOp, LambdaResult};
use crate::lambda::TriplewiseLambda;
use crate::launch::GridConfig;
use crate::layout::Addressing;

/// Launches the triplewise kernel on `grid`.
///
/// Direct addressing follows the same `stride >= 1` rule as the other
/// variants for all four tensors.
#[allow(clippy::too_many_arguments)]
pub fn launch_triplewise<R: Runtime, E: LambdaElement, L: TriplewiseLambda>(
    client: &ComputeClient<R>,
    grid: &GridConfig,
    w: Operand<'_, R>,
    x: Operand<'_, R>,
    y: Operand<'_, R>,
    z: Operand<'_, R>,
    args: &TensorHandle<R>,
    addressing: Addressing,
) -> LambdaResult<()> {
    let length = launch_length(grid, &z, &[&w, &x, &y])?;
    if length == 0 {
        return Ok(());
    }

    unsafe {
        triplewise_kernel::launch_unchecked::<L, R>(
            client,
            grid.cube_count(),
            grid.cube_dim(),
            w.handle.as_arg(1),
            x.handle.as_arg(1),
            y.handle.as_arg(1),
            z.handle.as_arg(1),
            args.as_arg(1),
            ScalarArg::new(w.stride_arg()?),
            ScalarArg::new(x.stride_arg()?),
            ScalarArg::new(y.stride_arg()?),
            ScalarArg::new(z.stride_arg()?),
            ScalarArg::new(length),
            addressing.is_direct(),
            E::as_type_native_unchecked(),
        )
        .map_err(|e| {
            LambdaError::launch(
                LambdaOp::ApplyTriplewise,
                format!("triplewise kernel failed: {:?}", e),
            )
        })
    }
}

#[cube(launch_unchecked)]
fn triplewise_kernel<E: Numeric, L: TriplewiseLambda>(
    w: &Tensor<Line<E>>,
    x: &Tensor<Line<E>>,
    y: &Tensor<Line<E>>,
    z: &mut Tensor<Line<E>>,
    args: &Tensor<Line<E>>,
    w_stride: u32,
    x_stride: u32,
    y_stride: u32,
    z_stride: u32,
    length: u32,
    #[comptime] direct: bool,
    #[define(E)] _dtype: StorageType,
) {
    let grid_size = CUBE_COUNT * CUBE_DIM;
    let mut e = CUBE_POS * CUBE_DIM + UNIT_POS;

    while e < length {
        let w_offset = element_offset::<E>(w, e, w_stride, direct);
        let x_offset = element_offset::<E>(x, e, x_stride, direct);
        let y_offset = element_offset::<E>(y, e, y_stride, direct);
        let z_offset = element_offset::<E>(z, e, z_stride, direct);

        z[z_offset] = L::apply::<E>(w[w_offset], x[x_offset], y[y_offset], args);
        e += grid_size;
    }
}
