//! Error types for lambda operations.

use alloc::string::String;
use core::fmt;

use crate::dtype::DType;

/// The five tensor-facing lambda operations.
///
/// Used to tell the caller which operation a device failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LambdaOp {
    Apply,
    ApplyIndexed,
    ApplyPairwise,
    ApplyIndexedPairwise,
    ApplyTriplewise,
}

impl LambdaOp {
    /// Returns the operation name as exposed on the array.
    pub fn name(&self) -> &'static str {
        match self {
            LambdaOp::Apply => "apply_lambda",
            LambdaOp::ApplyIndexed => "apply_indexed_lambda",
            LambdaOp::ApplyPairwise => "apply_pairwise_lambda",
            LambdaOp::ApplyIndexedPairwise => "apply_indexed_pairwise_lambda",
            LambdaOp::ApplyTriplewise => "apply_triplewise_lambda",
        }
    }
}

impl fmt::Display for LambdaOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that can occur while applying a lambda.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum LambdaError {
    /// Participating tensors do not share one element type.
    #[cfg_attr(feature = "std", error("{op}: data types must be the same, target is {expected:?}, operand is {got:?}"))]
    TypeMismatch {
        op: LambdaOp,
        expected: DType,
        got: DType,
    },

    /// A source tensor does not cover the destination's elements.
    #[cfg_attr(feature = "std", error("{op}: operand has {got} elements, target has {expected}"))]
    ShapeMismatch {
        op: LambdaOp,
        expected: usize,
        got: usize,
    },

    /// The transformation reads more captured scalars than the call binds.
    #[cfg_attr(feature = "std", error("{op}: transformation reads {expected} captured arguments, {got} given"))]
    ArgumentCount {
        op: LambdaOp,
        expected: usize,
        got: usize,
    },

    /// The execution grid cannot be launched.
    #[cfg_attr(feature = "std", error("invalid grid: {message}"))]
    InvalidGrid { message: String },

    /// The kernel could not be submitted to the queue.
    #[cfg_attr(feature = "std", error("{op} launch error: {message}"))]
    LaunchError { op: LambdaOp, message: String },

    /// The queue reported a failure while draining.
    #[cfg_attr(feature = "std", error("{op} execution failed: {message}"))]
    ExecutionFailed { op: LambdaOp, message: String },

    /// Host element type does not match the array's data type.
    #[cfg_attr(feature = "std", error("array holds {expected:?} elements, requested {got:?}"))]
    DTypeMismatch { expected: DType, got: DType },

    /// Host buffer does not match the requested tensor.
    #[cfg_attr(feature = "std", error("shape error: {message}"))]
    ShapeError { message: String },
}

impl LambdaError {
    pub fn type_mismatch(op: LambdaOp, expected: DType, got: DType) -> Self {
        Self::TypeMismatch { op, expected, got }
    }

    pub fn shape_mismatch(op: LambdaOp, expected: usize, got: usize) -> Self {
        Self::ShapeMismatch { op, expected, got }
    }

    pub fn argument_count(op: LambdaOp, expected: usize, got: usize) -> Self {
        Self::ArgumentCount { op, expected, got }
    }

    pub fn grid(message: impl Into<String>) -> Self {
        Self::InvalidGrid {
            message: message.into(),
        }
    }

    pub fn launch(op: LambdaOp, message: impl Into<String>) -> Self {
        Self::LaunchError {
            op,
            message: message.into(),
        }
    }

    pub fn execution(op: LambdaOp, message: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            op,
            message: message.into(),
        }
    }

    pub fn shape(message: impl Into<String>) -> Self {
        Self::ShapeError {
            message: message.into(),
        }
    }

    /// The operation this error was raised by, if any.
    pub fn op(&self) -> Option<LambdaOp> {
        match self {
            Self::TypeMismatch { op, .. }
            | Self::ShapeMismatch { op, .. }
            | Self::ArgumentCount { op, .. }
            | Self::LaunchError { op, .. }
            | Self::ExecutionFailed { op, .. } => Some(*op),
            Self::InvalidGrid { .. } | Self::DTypeMismatch { .. } | Self::ShapeError { .. } => None,
        }
    }
}

/// Result type for lambda operations.
pub type LambdaResult<T> = core::result::Result<T, LambdaError>;
