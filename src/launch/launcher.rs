//! Dispatch/launch layer.
//!
//! One method per kernel variant. Each detects the addressing mode, binds
//! the captured arguments, queues the kernel on the fixed grid and then
//! blocks on the queue. A failed drain is reported against the operation
//! that submitted the work; nothing is retried.

use alloc::format;

use cubecl::Runtime;
use cubecl::client::ComputeClient;
use cubecl_common::future;

use crate::dtype::LambdaElement;
use crate::error::{LambdaError, LambdaOp, LambdaResult};
use crate::kernels::{self, Operand};
use crate::lambda::{
    Captures, IndexedLambda, IndexedPairwiseLambda, LambdaArgs, PairwiseLambda,
    TriplewiseLambda, UnaryLambda,
};
use crate::layout::Addressing;

use super::config::GridConfig;

/// Launches lambda kernels on one client's queue.
///
/// The element type `E` of every method is the concrete type selected for
/// the call; the launcher itself is type-agnostic.
pub struct LambdaLauncher<'a, R: Runtime> {
    client: &'a ComputeClient<R>,
    grid: GridConfig,
}

impl<'a, R: Runtime> LambdaLauncher<'a, R> {
    /// Creates a launcher for `grid`, rejecting grids that cannot launch.
    pub fn new(client: &'a ComputeClient<R>, grid: GridConfig) -> LambdaResult<Self> {
        grid.validate()?;
        Ok(Self { client, grid })
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    /// `z[e] = L(x[e])`
    pub fn unary<E: LambdaElement, L: UnaryLambda + Captures>(
        &self,
        x: Operand<'_, R>,
        z: Operand<'_, R>,
        args: &LambdaArgs,
    ) -> LambdaResult<()> {
        let op = LambdaOp::Apply;
        args.check_arity(op, L::ARGS)?;
        if z.layout.is_empty() {
            return Ok(());
        }

        let addressing = Addressing::detect(&[x.layout, z.layout]);
        self.log_launch::<E>(op, z.layout.length(), addressing);

        let args = args.upload::<R, E>(self.client);
        kernels::launch_unary::<R, E, L>(self.client, &self.grid, x, z, &args, addressing)?;
        self.synchronize(op)
    }

    /// `z[e] = L(e, x[e])`
    pub fn indexed<E: LambdaElement, L: IndexedLambda + Captures>(
        &self,
        x: Operand<'_, R>,
        z: Operand<'_, R>,
        args: &LambdaArgs,
    ) -> LambdaResult<()> {
        let op = LambdaOp::ApplyIndexed;
        args.check_arity(op, L::ARGS)?;
        if z.layout.is_empty() {
            return Ok(());
        }

        let addressing = Addressing::detect(&[x.layout, z.layout]);
        self.log_launch::<E>(op, z.layout.length(), addressing);

        let args = args.upload::<R, E>(self.client);
        kernels::launch_indexed::<R, E, L>(self.client, &self.grid, x, z, &args, addressing)?;
        self.synchronize(op)
    }

    /// `z[e] = L(x[e], y[e])`, or `L(x[e], y[0])` when `other_is_scalar`.
    pub fn pairwise<E: LambdaElement, L: PairwiseLambda + Captures>(
        &self,
        x: Operand<'_, R>,
        other_is_scalar: bool,
        y: Operand<'_, R>,
        z: Operand<'_, R>,
        args: &LambdaArgs,
    ) -> LambdaResult<()> {
        let op = LambdaOp::ApplyPairwise;
        args.check_arity(op, L::ARGS)?;
        if z.layout.is_empty() {
            return Ok(());
        }

        let args_handle = args.upload::<R, E>(self.client);

        if other_is_scalar {
            let addressing = Addressing::detect(&[x.layout, z.layout]);
            self.log_launch::<E>(op, z.layout.length(), addressing);
            log::trace!("{op}: second operand broadcast as a scalar");

            kernels::launch_pairwise_scalar::<R, E, L>(
                self.client,
                &self.grid,
                x,
                y.handle,
                z,
                &args_handle,
                addressing,
            )?;
        } else {
            let addressing = Addressing::detect(&[x.layout, y.layout, z.layout]);
            self.log_launch::<E>(op, z.layout.length(), addressing);

            kernels::launch_pairwise::<R, E, L>(
                self.client,
                &self.grid,
                x,
                y,
                z,
                &args_handle,
                addressing,
            )?;
        }

        self.synchronize(op)
    }

    /// `z[e] = L(e, x[e], y[e])`
    pub fn indexed_pairwise<E: LambdaElement, L: IndexedPairwiseLambda + Captures>(
        &self,
        x: Operand<'_, R>,
        y: Operand<'_, R>,
        z: Operand<'_, R>,
        args: &LambdaArgs,
    ) -> LambdaResult<()> {
        let op = LambdaOp::ApplyIndexedPairwise;
        args.check_arity(op, L::ARGS)?;
        if z.layout.is_empty() {
            return Ok(());
        }

        let addressing = Addressing::detect(&[x.layout, y.layout, z.layout]);
        self.log_launch::<E>(op, z.layout.length(), addressing);

        let args = args.upload::<R, E>(self.client);
        kernels::launch_indexed_pairwise::<R, E, L>(
            self.client,
            &self.grid,
            x,
            y,
            z,
            &args,
            addressing,
        )?;
        self.synchronize(op)
    }

    /// `z[e] = L(w[e], x[e], y[e])`
    pub fn triplewise<E: LambdaElement, L: TriplewiseLambda + Captures>(
        &self,
        w: Operand<'_, R>,
        x: Operand<'_, R>,
        y: Operand<'_, R>,
        z: Operand<'_, R>,
        args: &LambdaArgs,
    ) -> LambdaResult<()> {
        let op = LambdaOp::ApplyTriplewise;
        args.check_arity(op, L::ARGS)?;
        if z.layout.is_empty() {
            return Ok(());
        }

        let addressing = Addressing::detect(&[w.layout, x.layout, y.layout, z.layout]);
        self.log_launch::<E>(op, z.layout.length(), addressing);

        let args = args.upload::<R, E>(self.client);
        kernels::launch_triplewise::<R, E, L>(
            self.client,
            &self.grid,
            w,
            x,
            y,
            z,
            &args,
            addressing,
        )?;
        self.synchronize(op)
    }

    /// Blocks until the queue drains.
    fn synchronize(&self, op: LambdaOp) -> LambdaResult<()> {
        log::trace!("{op}: sync begin");
        let result = future::block_on(self.client.sync());
        log::trace!("{op}: sync end");

        result.map_err(|err| {
            log::warn!("{op}: queue reported a failure: {err:?}");
            LambdaError::execution(op, format!("{err:?}"))
        })
    }

    fn log_launch<E: LambdaElement>(&self, op: LambdaOp, length: usize, addressing: Addressing) {
        log::debug!(
            "{op}: {length} {} elements, {} addressing, grid {}x{} ({} bytes shared)",
            E::DTYPE,
            addressing.name(),
            self.grid.cube_count,
            self.grid.cube_dim,
            self.grid.shared_memory,
        );
    }
}
