//! Device arrays and the tensor-facing lambda operations.
//!
//! A [`LambdaArray`] is a view (shape, strides, order) into a device buffer,
//! tagged with its element type. The five `apply_*` operations live in
//! `ops`.

mod ops;
mod usage;

use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;

use cubecl::Runtime;
use cubecl::client::ComputeClient;
use cubecl::prelude::*;
use cubecl::std::tensor::TensorHandle;

use crate::dispatch_dtype;
use crate::dtype::{DType, LambdaElement};
use crate::error::{LambdaError, LambdaResult};
use crate::kernels::Operand;
use crate::layout::{Order, ShapeDescriptor};

use usage::BufferUsage;

/// A typed view into a device buffer.
pub struct LambdaArray<R: Runtime> {
    tensor: TensorHandle<R>,
    layout: ShapeDescriptor,
    dtype: DType,
    capacity: usize,
    usage: Arc<BufferUsage>,
}

impl<R: Runtime> LambdaArray<R> {
    /// Uploads `data` as a row-major array of `shape`.
    pub fn from_data<E: LambdaElement>(
        client: &ComputeClient<R>,
        shape: &[usize],
        data: &[E],
    ) -> LambdaResult<Self> {
        Self::from_data_with_order(client, shape, Order::C, data)
    }

    /// Uploads `data`, given in memory order, as a dense array of `shape`
    /// laid out in `order`.
    pub fn from_data_with_order<E: LambdaElement>(
        client: &ComputeClient<R>,
        shape: &[usize],
        order: Order,
        data: &[E],
    ) -> LambdaResult<Self> {
        let layout = ShapeDescriptor::contiguous(shape, order);
        if layout.length() != data.len() {
            return Err(LambdaError::shape(format!(
                "{} values given for shape {:?}",
                data.len(),
                shape
            )));
        }

        // Empty arrays still get a one-element buffer to bind.
        let placeholder = [E::from_f64(0.0)];
        let bytes = if data.is_empty() {
            E::as_bytes(&placeholder)
        } else {
            E::as_bytes(data)
        };
        let handle = client.create_from_slice(bytes);

        let tensor = TensorHandle::new(
            handle,
            layout.shape().to_vec(),
            layout.strides().to_vec(),
            E::as_type_native_unchecked(),
        );

        Ok(Self {
            tensor,
            capacity: data.len().max(1),
            layout,
            dtype: E::DTYPE,
            usage: BufferUsage::new(),
        })
    }

    /// A zero-filled row-major array.
    pub fn zeros(client: &ComputeClient<R>, shape: &[usize], dtype: DType) -> Self {
        let layout = ShapeDescriptor::contiguous(shape, Order::C);
        let storage = dispatch_dtype!(dtype, E => { E::as_type_native_unchecked() });
        let tensor = if layout.is_empty() {
            let placeholder = TensorHandle::<R>::zeros(client, alloc::vec![1], storage);
            TensorHandle::new(
                placeholder.handle,
                shape.to_vec(),
                layout.strides().to_vec(),
                storage,
            )
        } else {
            TensorHandle::zeros(client, shape.to_vec(), storage)
        };

        Self {
            tensor,
            capacity: layout.length().max(1),
            layout,
            dtype,
            usage: BufferUsage::new(),
        }
    }

    /// A view of `shape` and `strides` (in elements) over the same buffer.
    ///
    /// The order tag is inferred from the strides.
    pub fn view(&self, shape: &[usize], strides: &[usize]) -> LambdaResult<Self> {
        let layout = ShapeDescriptor::strided(shape, strides)?;
        self.view_with_layout(layout)
    }

    /// A view with an explicit layout over the same buffer.
    pub fn view_with_layout(&self, layout: ShapeDescriptor) -> LambdaResult<Self> {
        if layout.required_len() > self.capacity {
            return Err(LambdaError::shape(format!(
                "view {:?} / {:?} reaches element {}, buffer holds {}",
                layout.shape(),
                layout.strides(),
                layout.required_len(),
                self.capacity
            )));
        }

        let tensor = TensorHandle::new(
            self.tensor.handle.clone(),
            layout.shape().to_vec(),
            layout.strides().to_vec(),
            self.tensor.dtype,
        );

        Ok(Self {
            tensor,
            layout,
            dtype: self.dtype,
            capacity: self.capacity,
            usage: Arc::clone(&self.usage),
        })
    }

    /// A second handle on this exact view, used as the target of an
    /// in-place application.
    pub fn alias(&self) -> Self {
        self.clone()
    }

    /// Reads the logical elements back in row-major order. Blocks.
    pub fn to_data<E: LambdaElement>(&self, client: &ComputeClient<R>) -> LambdaResult<Vec<E>> {
        if E::DTYPE != self.dtype {
            return Err(LambdaError::DTypeMismatch {
                expected: self.dtype,
                got: E::DTYPE,
            });
        }

        let bytes = client.read_one(self.tensor.handle.clone());
        let values = E::from_bytes(&bytes);

        Ok((0..self.layout.length())
            .map(|e| values[self.layout.offset(e)])
            .collect())
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn layout(&self) -> &ShapeDescriptor {
        &self.layout
    }

    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    pub fn length(&self) -> usize {
        self.layout.length()
    }

    pub fn is_scalar(&self) -> bool {
        self.layout.is_scalar()
    }

    pub fn handle(&self) -> &TensorHandle<R> {
        &self.tensor
    }

    /// Calls currently reading this array's buffer.
    pub fn in_flight_reads(&self) -> usize {
        self.usage.readers()
    }

    /// True while a call is writing this array's buffer.
    pub fn is_being_written(&self) -> bool {
        self.usage.writers() > 0
    }

    pub(crate) fn operand(&self) -> Operand<'_, R> {
        Operand::new(&self.tensor, &self.layout)
    }
}

/// Clones share the device buffer and its usage marks.
impl<R: Runtime> Clone for LambdaArray<R> {
    fn clone(&self) -> Self {
        Self {
            tensor: self.tensor.clone(),
            layout: self.layout.clone(),
            dtype: self.dtype,
            capacity: self.capacity,
            usage: Arc::clone(&self.usage),
        }
    }
}

impl<R: Runtime> core::fmt::Debug for LambdaArray<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LambdaArray")
            .field("dtype", &self.dtype)
            .field("shape", &self.layout.shape())
            .field("strides", &self.layout.strides())
            .field("order", &self.layout.order())
            .field("buffer", &self.usage.id())
            .finish()
    }
}
