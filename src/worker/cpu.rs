//! CPU-based worker for wallet generation.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crossbeam_channel::Sender;
use rand::{CryptoRng, RngCore};

use crate::crypto::{KeyPairGenerator, Wallet};
use crate::error::Result;

/// Statistics shared by all workers of a pool.
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Total wallets generated
    pub keys_generated: AtomicU64,
}

impl WorkerStats {
    /// Creates new worker stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total wallets generated.
    pub fn total_keys(&self) -> u64 {
        self.keys_generated.load(Ordering::Relaxed)
    }
}

/// A CPU worker that generates a fixed number of wallets.
pub struct CpuWorker<'a> {
    /// Worker ID
    id: usize,
    /// Number of wallets this worker is responsible for
    quota: usize,
    /// Channel to send results
    result_tx: Sender<Result<Wallet>>,
    /// Shared stop flag
    stop_flag: &'a AtomicBool,
    /// Shared statistics
    stats: &'a WorkerStats,
}

impl<'a> CpuWorker<'a> {
    /// Creates a new CPU worker.
    pub fn new(
        id: usize,
        quota: usize,
        result_tx: Sender<Result<Wallet>>,
        stop_flag: &'a AtomicBool,
        stats: &'a WorkerStats,
    ) -> Self {
        Self {
            id,
            quota,
            result_tx,
            stop_flag,
            stats,
        }
    }

    /// Runs the worker loop.
    ///
    /// Generates wallets until:
    /// - The quota is met
    /// - Generation fails (the error is sent through the channel)
    /// - Stop flag is set
    /// - Channel is closed
    pub fn run<R: RngCore + CryptoRng>(&self, mut generator: KeyPairGenerator<R>) {
        let mut generated = 0;

        while generated < self.quota {
            if self.stop_flag.load(Ordering::Relaxed) {
                break;
            }

            let result = generator.generate_wallet();
            let failed = result.is_err();

            if self.result_tx.send(result).is_err() || failed {
                break;
            }

            generated += 1;
            self.stats.keys_generated.fetch_add(1, Ordering::Relaxed);
        }

        tracing::debug!(worker = self.id, generated, "worker finished");
    }

    /// Returns the worker ID.
    pub fn id(&self) -> usize {
        self.id
    }
}
