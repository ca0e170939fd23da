//! Captured scalars and the transformation handle carrying them.

use alloc::vec::Vec;
use core::marker::PhantomData;

use cubecl::Runtime;
use cubecl::client::ComputeClient;
use cubecl::prelude::*;
use cubecl::std::tensor::TensorHandle;
use smallvec::SmallVec;

use crate::dtype::LambdaElement;
use crate::error::{LambdaError, LambdaOp, LambdaResult};

/// Scalars captured by a transformation, in the order it reads them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LambdaArgs {
    values: SmallVec<[f64; 4]>,
}

impl LambdaArgs {
    /// No captured state.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(values: &[f64]) -> Self {
        Self {
            values: SmallVec::from_slice(values),
        }
    }

    /// Appends one captured scalar.
    pub fn with(mut self, value: f64) -> Self {
        self.values.push(value);
        self
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Rejects capture lists shorter than what the transformation reads.
    pub fn check_arity(&self, op: LambdaOp, required: usize) -> LambdaResult<()> {
        if self.len() < required {
            return Err(LambdaError::argument_count(op, required, self.len()));
        }
        Ok(())
    }

    /// Narrows the captures to `E`. Always yields at least one element.
    pub fn to_elements<E: LambdaElement>(&self) -> Vec<E> {
        if self.values.is_empty() {
            return alloc::vec![E::from_f64(0.0)];
        }
        self.values.iter().map(|value| E::from_f64(*value)).collect()
    }

    /// Uploads the captures as a contiguous device tensor of `E`.
    pub(crate) fn upload<R: Runtime, E: LambdaElement>(
        &self,
        client: &ComputeClient<R>,
    ) -> TensorHandle<R> {
        let elements = self.to_elements::<E>();
        let handle = client.create_from_slice(E::as_bytes(&elements));
        TensorHandle::new_contiguous(alloc::vec![elements.len()], handle, E::as_type_native_unchecked())
    }
}

/// A transformation `L` together with the state it closes over.
///
/// ```ignore
/// let scale = Lambda::<Scale>::with_args([0.5]);
/// x.apply_lambda(&client, &scale, &mut z, None)?;
/// ```
#[derive(Debug, Clone)]
pub struct Lambda<L> {
    args: LambdaArgs,
    _lambda: PhantomData<L>,
}

impl<L> Lambda<L> {
    /// A transformation without captured state.
    pub fn new() -> Self {
        Self {
            args: LambdaArgs::none(),
            _lambda: PhantomData,
        }
    }

    pub fn with_args<const N: usize>(values: [f64; N]) -> Self {
        Self {
            args: LambdaArgs::new(&values),
            _lambda: PhantomData,
        }
    }

    pub fn from_args(args: LambdaArgs) -> Self {
        Self {
            args,
            _lambda: PhantomData,
        }
    }

    pub fn args(&self) -> &LambdaArgs {
        &self.args
    }
}

impl<L> Default for Lambda<L> {
    fn default() -> Self {
        Self::new()
    }
}
