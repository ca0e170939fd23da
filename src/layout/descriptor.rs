//! Shape descriptors and the offset resolver.

use alloc::format;
use core::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{LambdaError, LambdaResult};

/// Inline storage for shapes and strides.
pub type Dims = SmallVec<[usize; 6]>;

/// Effective stride reported for layouts that cannot be walked uniformly.
pub const IRREGULAR_STRIDE: usize = 0;

/// Memory order tag of a tensor view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Order {
    /// Row-major, last dimension fastest.
    #[default]
    C,
    /// Column-major, first dimension fastest.
    F,
}

impl Order {
    /// Guesses the order tag of a strided view.
    ///
    /// Dimensions of extent 1 carry no ordering information and are skipped.
    pub fn infer(shape: &[usize], strides: &[usize]) -> Order {
        let mut dims = shape
            .iter()
            .zip(strides.iter())
            .filter(|(extent, _)| **extent > 1)
            .map(|(_, stride)| *stride);

        let first = dims.next();
        let last = dims.last();

        match (first, last) {
            (Some(first), Some(last)) if first < last => Order::F,
            _ => Order::C,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Order::C => 'c',
            Order::F => 'f',
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Shape, strides (in elements) and order of a tensor view.
///
/// The linear element index `e` always enumerates the logical elements in
/// row-major order, whatever the memory layout. Strides are free: permuted,
/// gapped and zero (broadcast) strides are all legal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeDescriptor {
    shape: Dims,
    strides: Dims,
    order: Order,
}

impl ShapeDescriptor {
    /// A dense view of `shape` laid out in `order`.
    pub fn contiguous(shape: &[usize], order: Order) -> Self {
        let rank = shape.len();
        let mut strides: Dims = SmallVec::from_elem(1, rank);

        match order {
            Order::C => {
                for dim in (0..rank.saturating_sub(1)).rev() {
                    strides[dim] = strides[dim + 1].saturating_mul(shape[dim + 1].max(1));
                }
            }
            Order::F => {
                for dim in 1..rank {
                    strides[dim] = strides[dim - 1].saturating_mul(shape[dim - 1].max(1));
                }
            }
        }

        Self {
            shape: SmallVec::from_slice(shape),
            strides,
            order,
        }
    }

    /// A view with explicit strides; the order tag is inferred.
    pub fn strided(shape: &[usize], strides: &[usize]) -> LambdaResult<Self> {
        let order = Order::infer(shape, strides);
        Self::with_order(shape, strides, order)
    }

    /// A view with explicit strides and order tag.
    pub fn with_order(shape: &[usize], strides: &[usize], order: Order) -> LambdaResult<Self> {
        if shape.len() != strides.len() {
            return Err(LambdaError::shape(format!(
                "rank mismatch: shape has {} dims, strides have {}",
                shape.len(),
                strides.len()
            )));
        }

        let desc = Self {
            shape: SmallVec::from_slice(shape),
            strides: SmallVec::from_slice(strides),
            order,
        };

        if desc.checked_length().is_none() {
            return Err(LambdaError::shape(format!(
                "element count of shape {:?} overflows usize",
                shape
            )));
        }
        if desc.checked_required_len().is_none() {
            return Err(LambdaError::shape(format!(
                "view {:?} / {:?} addresses past usize::MAX",
                shape, strides
            )));
        }

        Ok(desc)
    }

    /// A single-element view.
    pub fn scalar() -> Self {
        Self::contiguous(&[1], Order::C)
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Number of logical elements.
    ///
    /// Saturates at `usize::MAX`; views built through
    /// [`strided`](Self::strided) never get there.
    pub fn length(&self) -> usize {
        self.checked_length().unwrap_or(usize::MAX)
    }

    /// Number of logical elements, `None` on overflow.
    pub fn checked_length(&self) -> Option<usize> {
        self.shape
            .iter()
            .try_fold(1usize, |acc, extent| acc.checked_mul(*extent))
    }

    /// True for a view holding exactly one element.
    pub fn is_scalar(&self) -> bool {
        self.length() == 1
    }

    pub fn is_empty(&self) -> bool {
        self.length() == 0
    }

    /// Physical offset (in elements) of logical element `index`.
    ///
    /// `index` must be below [`length`](Self::length).
    pub fn offset(&self, index: usize) -> usize {
        let mut remaining = index;
        let mut offset = 0;

        for dim in (0..self.rank()).rev() {
            let extent = self.shape[dim];
            offset += (remaining % extent) * self.strides[dim];
            remaining /= extent;
        }

        offset
    }

    /// Uniform stride of the row-major element walk.
    ///
    /// Returns `s > 0` when logical element `e` lives at `e * s` for every `e`,
    /// and [`IRREGULAR_STRIDE`] otherwise (permuted, gapped or broadcast
    /// layouts).
    pub fn effective_stride(&self) -> usize {
        if self.length() <= 1 {
            return 1;
        }

        let mut walk = None;
        let mut expected = 0;

        for dim in (0..self.rank()).rev() {
            let extent = self.shape[dim];
            if extent == 1 {
                continue;
            }
            let stride = self.strides[dim];

            match walk {
                None => {
                    if stride == 0 {
                        return IRREGULAR_STRIDE;
                    }
                    walk = Some(stride);
                }
                Some(_) if stride != expected => return IRREGULAR_STRIDE,
                Some(_) => {}
            }
            expected = stride.saturating_mul(extent);
        }

        walk.unwrap_or(1)
    }

    /// True when the view is a dense row-major block.
    pub fn is_contiguous(&self) -> bool {
        self.effective_stride() == 1
    }

    /// Smallest buffer length (in elements) the view can address.
    ///
    /// Saturates at `usize::MAX`, which no buffer can satisfy.
    pub fn required_len(&self) -> usize {
        self.checked_required_len().unwrap_or(usize::MAX)
    }

    /// Smallest buffer length the view can address, `None` on overflow.
    pub fn checked_required_len(&self) -> Option<usize> {
        if self.is_empty() {
            return Some(0);
        }
        self.shape
            .iter()
            .zip(self.strides.iter())
            .try_fold(1usize, |acc, (extent, stride)| {
                (extent - 1).checked_mul(*stride)?.checked_add(acc)
            })
    }
}
