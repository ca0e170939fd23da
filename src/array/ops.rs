//! The five lambda operations on [`LambdaArray`].
//!
//! Every operation follows the same protocol:
//! 1. all participating arrays must share the target's data type,
//! 2. every source must cover the target's elements, and the call must bind
//!    as many captures as the transformation reads,
//! 3. the target is marked as written and the sources as read,
//! 4. the data type is resolved once and the kernel is launched,
//! 5. the marks are released and the launch result is returned.
//!
//! Steps 1 and 2 fail before any buffer is marked or any device work is
//! queued.

use cubecl::Runtime;
use cubecl::client::ComputeClient;

use super::LambdaArray;
use super::usage::SpecialUse;
use crate::dispatch_dtype;
use crate::error::{LambdaError, LambdaOp, LambdaResult};
use crate::lambda::{
    Captures, IndexedLambda, IndexedPairwiseLambda, Lambda, PairwiseLambda, TriplewiseLambda,
    UnaryLambda,
};
use crate::launch::{GridConfig, LambdaLauncher};

impl<R: Runtime> LambdaArray<R> {
    /// `target[e] = L(self[e])`
    ///
    /// `grid` defaults to [`GridConfig::default`].
    pub fn apply_lambda<L: UnaryLambda + Captures>(
        &self,
        client: &ComputeClient<R>,
        lambda: &Lambda<L>,
        target: &mut LambdaArray<R>,
        grid: Option<GridConfig>,
    ) -> LambdaResult<()> {
        let op = LambdaOp::Apply;
        check_dtypes(op, target, &[self])?;
        check_length(op, target, self)?;
        lambda.args().check_arity(op, L::ARGS)?;

        let launcher = LambdaLauncher::new(client, grid.unwrap_or_default())?;
        let usage = SpecialUse::prepare(op, &[&target.usage], &[&self.usage]);

        let result = dispatch_dtype!(target.dtype, E => {
            launcher.unary::<E, L>(self.operand(), target.operand(), lambda.args())
        });

        usage.release();
        result
    }

    /// `target[e] = L(e, self[e])`, `e` being the row-major logical index of
    /// the target.
    pub fn apply_indexed_lambda<L: IndexedLambda + Captures>(
        &self,
        client: &ComputeClient<R>,
        lambda: &Lambda<L>,
        target: &mut LambdaArray<R>,
        grid: Option<GridConfig>,
    ) -> LambdaResult<()> {
        let op = LambdaOp::ApplyIndexed;
        check_dtypes(op, target, &[self])?;
        check_length(op, target, self)?;
        lambda.args().check_arity(op, L::ARGS)?;

        let launcher = LambdaLauncher::new(client, grid.unwrap_or_default())?;
        let usage = SpecialUse::prepare(op, &[&target.usage], &[&self.usage]);

        let result = dispatch_dtype!(target.dtype, E => {
            launcher.indexed::<E, L>(self.operand(), target.operand(), lambda.args())
        });

        usage.release();
        result
    }

    /// `target[e] = L(self[e], other[e])`.
    ///
    /// A single-element `other` is broadcast: `target[e] = L(self[e], other[0])`.
    pub fn apply_pairwise_lambda<L: PairwiseLambda + Captures>(
        &self,
        client: &ComputeClient<R>,
        lambda: &Lambda<L>,
        other: &LambdaArray<R>,
        target: &mut LambdaArray<R>,
        grid: Option<GridConfig>,
    ) -> LambdaResult<()> {
        let op = LambdaOp::ApplyPairwise;
        check_dtypes(op, target, &[self, other])?;
        check_length(op, target, self)?;

        let other_is_scalar = other.is_scalar();
        if !other_is_scalar {
            check_length(op, target, other)?;
        }

        lambda.args().check_arity(op, L::ARGS)?;

        let launcher = LambdaLauncher::new(client, grid.unwrap_or_default())?;
        let usage = SpecialUse::prepare(op, &[&target.usage], &[&self.usage, &other.usage]);

        let result = dispatch_dtype!(target.dtype, E => {
            launcher.pairwise::<E, L>(
                self.operand(),
                other_is_scalar,
                other.operand(),
                target.operand(),
                lambda.args(),
            )
        });

        usage.release();
        result
    }

    /// `target[e] = L(e, self[e], other[e])`
    pub fn apply_indexed_pairwise_lambda<L: IndexedPairwiseLambda + Captures>(
        &self,
        client: &ComputeClient<R>,
        lambda: &Lambda<L>,
        other: &LambdaArray<R>,
        target: &mut LambdaArray<R>,
        grid: Option<GridConfig>,
    ) -> LambdaResult<()> {
        let op = LambdaOp::ApplyIndexedPairwise;
        check_dtypes(op, target, &[self, other])?;
        check_length(op, target, self)?;
        check_length(op, target, other)?;
        lambda.args().check_arity(op, L::ARGS)?;

        let launcher = LambdaLauncher::new(client, grid.unwrap_or_default())?;
        let usage = SpecialUse::prepare(op, &[&target.usage], &[&self.usage, &other.usage]);

        let result = dispatch_dtype!(target.dtype, E => {
            launcher.indexed_pairwise::<E, L>(
                self.operand(),
                other.operand(),
                target.operand(),
                lambda.args(),
            )
        });

        usage.release();
        result
    }

    /// `target[e] = L(self[e], second[e], third[e])`
    pub fn apply_triplewise_lambda<L: TriplewiseLambda + Captures>(
        &self,
        client: &ComputeClient<R>,
        lambda: &Lambda<L>,
        second: &LambdaArray<R>,
        third: &LambdaArray<R>,
        target: &mut LambdaArray<R>,
        grid: Option<GridConfig>,
    ) -> LambdaResult<()> {
        let op = LambdaOp::ApplyTriplewise;
        check_dtypes(op, target, &[self, second, third])?;
        check_length(op, target, self)?;
        check_length(op, target, second)?;
        check_length(op, target, third)?;
        lambda.args().check_arity(op, L::ARGS)?;

        let launcher = LambdaLauncher::new(client, grid.unwrap_or_default())?;
        let usage = SpecialUse::prepare(
            op,
            &[&target.usage],
            &[&self.usage, &second.usage, &third.usage],
        );

        let result = dispatch_dtype!(target.dtype, E => {
            launcher.triplewise::<E, L>(
                self.operand(),
                second.operand(),
                third.operand(),
                target.operand(),
                lambda.args(),
            )
        });

        usage.release();
        result
    }
}

fn check_dtypes<R: Runtime>(
    op: LambdaOp,
    target: &LambdaArray<R>,
    sources: &[&LambdaArray<R>],
) -> LambdaResult<()> {
    match sources.iter().find(|source| source.dtype != target.dtype) {
        Some(source) => Err(LambdaError::type_mismatch(op, target.dtype, source.dtype)),
        None => Ok(()),
    }
}

fn check_length<R: Runtime>(
    op: LambdaOp,
    target: &LambdaArray<R>,
    source: &LambdaArray<R>,
) -> LambdaResult<()> {
    if source.length() != target.length() {
        return Err(LambdaError::shape_mismatch(op, target.length(), source.length()));
    }
    Ok(())
}
