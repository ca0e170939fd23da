//! Element addressing shared by every kernel variant.

use cubecl::prelude::*;

/// Physical offset of row-major logical element `index` of `tensor`.
///
/// Walks the dimensions from the innermost outwards, so any stride pattern
/// works: permuted, gapped or zero (broadcast).
#[cube]
pub fn resolve_offset<E: Numeric>(tensor: &Tensor<Line<E>>, index: u32) -> u32 {
    let mut remaining = index;
    let mut offset = 0u32;
    let mut dim = tensor.rank();

    while dim > 0 {
        dim -= 1;
        let extent = tensor.shape(dim);
        offset += (remaining % extent) * tensor.stride(dim);
        remaining /= extent;
    }

    offset
}

/// Offset of element `index`: `index * stride` when `direct`, resolved
/// from the tensor's shape and strides otherwise.
#[cube]
pub fn element_offset<E: Numeric>(
    tensor: &Tensor<Line<E>>,
    index: u32,
    stride: u32,
    #[comptime] direct: bool,
) -> u32 {
    if direct {
        index * stride
    } else {
        resolve_offset::<E>(tensor, index)
    }
}
