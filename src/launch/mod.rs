//! Launch module for lambda operations.
//!
//! Submits one kernel per call on a fixed grid and blocks until the queue
//! drains, turning a failed drain into an error for the caller.

mod config;
mod launcher;

pub use config::GridConfig;
pub use launcher::LambdaLauncher;
