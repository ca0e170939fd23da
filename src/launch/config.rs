//! Execution grid configuration.

use alloc::format;

use cubecl::prelude::{CubeCount, CubeDim};
use serde::{Deserialize, Serialize};

use crate::error::{LambdaError, LambdaResult};

/// Cubes launched by every lambda kernel.
pub const DEFAULT_CUBE_COUNT: u32 = 256;
/// Units per cube.
pub const DEFAULT_CUBE_DIM: u32 = 512;
/// Shared memory reserved per cube, in bytes.
pub const DEFAULT_SHARED_MEMORY: usize = 1024;
/// Largest cube the kernels are written for.
pub const MAX_CUBE_DIM: u32 = 1024;
/// Shared memory available per cube on every supported backend.
pub const MAX_SHARED_MEMORY: usize = 48 * 1024;

/// Shape of the execution grid.
///
/// The grid does not depend on the tensor size: kernels cover any length
/// with a grid-stride loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of cubes (worker groups).
    pub cube_count: u32,
    /// Units (workers) per cube.
    pub cube_dim: u32,
    /// Shared memory per cube, in bytes.
    ///
    /// Validated and logged only. The lambda kernels use no shared memory
    /// and cubecl takes no dynamic shared-memory size at launch.
    pub shared_memory: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cube_count: DEFAULT_CUBE_COUNT,
            cube_dim: DEFAULT_CUBE_DIM,
            shared_memory: DEFAULT_SHARED_MEMORY,
        }
    }
}

impl GridConfig {
    /// Creates the default grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of cubes.
    pub fn with_cube_count(mut self, cube_count: u32) -> Self {
        self.cube_count = cube_count;
        self
    }

    /// Sets the units per cube.
    pub fn with_cube_dim(mut self, cube_dim: u32) -> Self {
        self.cube_dim = cube_dim;
        self
    }

    /// Sets the shared memory per cube.
    pub fn with_shared_memory(mut self, bytes: usize) -> Self {
        self.shared_memory = bytes;
        self
    }

    /// Units in the whole grid, i.e. the stride of the grid-stride loop.
    pub fn total_units(&self) -> u64 {
        self.cube_count as u64 * self.cube_dim as u64
    }

    pub fn cube_count(&self) -> CubeCount {
        CubeCount::Static(self.cube_count, 1, 1)
    }

    pub fn cube_dim(&self) -> CubeDim {
        CubeDim {
            x: self.cube_dim,
            y: 1,
            z: 1,
        }
    }

    /// Rejects grids that cannot be launched.
    pub fn validate(&self) -> LambdaResult<()> {
        if self.cube_count == 0 || self.cube_dim == 0 {
            return Err(LambdaError::grid(format!(
                "empty grid: {} cubes of {} units",
                self.cube_count, self.cube_dim
            )));
        }
        if self.cube_dim > MAX_CUBE_DIM {
            return Err(LambdaError::grid(format!(
                "cube of {} units exceeds {}",
                self.cube_dim, MAX_CUBE_DIM
            )));
        }
        if self.shared_memory > MAX_SHARED_MEMORY {
            return Err(LambdaError::grid(format!(
                "{} bytes of shared memory exceed {}",
                self.shared_memory, MAX_SHARED_MEMORY
            )));
        }
        if self.total_units() > u32::MAX as u64 {
            return Err(LambdaError::grid(format!(
                "{} units overflow the 32-bit unit index",
                self.total_units()
            )));
        }
        Ok(())
    }
}
