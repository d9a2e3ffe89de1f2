//! Worker pool for parallel wallet generation.
//!
//! This module provides:
//! - Multi-threaded CPU workers, each with its own key generator
//! - Work split across workers for a fixed wallet count
//! - Progress tracking

mod cpu;
mod pool;

pub use cpu::{CpuWorker, WorkerStats};
pub use pool::WorkerPool;
