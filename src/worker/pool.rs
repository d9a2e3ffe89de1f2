//! Worker pool management.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crossbeam_channel::bounded;
use rand::{CryptoRng, RngCore};

use crate::crypto::{KeyPairGenerator, Wallet};
use crate::error::{Error, Result};

use super::cpu::{CpuWorker, WorkerStats};

const CHANNEL_CAPACITY: usize = 100;

/// Generates batches of wallets on a fixed number of worker threads.
///
/// Each worker builds its own generator from `make_generator`.
pub struct WorkerPool<F = fn() -> KeyPairGenerator> {
    /// Number of workers
    num_workers: usize,
    /// Statistics across all batches
    stats: WorkerStats,
    /// Generator factory, called once per worker thread
    make_generator: F,
}

impl WorkerPool {
    /// Creates a new worker pool with the specified number of workers,
    /// each drawing from the operating system's random source.
    pub fn new(num_workers: usize) -> Self {
        Self::with_generator(num_workers, KeyPairGenerator::new)
    }
}

impl<F, R> WorkerPool<F>
where
    F: Fn() -> KeyPairGenerator<R> + Sync,
    R: RngCore + CryptoRng,
{
    /// Creates a worker pool whose workers use generators built by
    /// `make_generator`.
    pub fn with_generator(num_workers: usize, make_generator: F) -> Self {
        Self {
            num_workers: num_workers.max(1),
            stats: WorkerStats::new(),
            make_generator,
        }
    }

    /// Generates `count` wallets.
    ///
    /// The first error stops every worker and is returned; wallets produced
    /// before it are discarded. The order of the returned wallets is not
    /// specified.
    pub fn generate(&self, count: usize) -> Result<Vec<Wallet>> {
        let quotas = split_quota(count, self.num_workers);
        tracing::debug!(count, workers = quotas.len(), "generating wallets");

        let stop_flag = AtomicBool::new(false);
        let stats = &self.stats;
        let make_generator = &self.make_generator;

        thread::scope(|scope| {
            let (result_tx, result_rx) = bounded(CHANNEL_CAPACITY);

            for (id, quota) in quotas.into_iter().enumerate() {
                let result_tx = result_tx.clone();
                let stop_flag = &stop_flag;

                let spawned = thread::Builder::new()
                    .name(format!("keygen-worker-{}", id))
                    .spawn_scoped(scope, move || {
                        CpuWorker::new(id, quota, result_tx, stop_flag, stats)
                            .run(make_generator());
                    });

                if let Err(e) = spawned {
                    stop_flag.store(true, Ordering::Relaxed);
                    return Err(Error::WorkerSpawn(e));
                }
            }

            // Drop the original sender so the channel closes when all workers finish
            drop(result_tx);

            let mut wallets = Vec::with_capacity(count);
            let mut failure = None;

            for result in result_rx.iter() {
                match result {
                    Ok(wallet) if failure.is_none() => wallets.push(wallet),
                    Ok(_) => {}
                    Err(e) => {
                        stop_flag.store(true, Ordering::Relaxed);
                        failure.get_or_insert(e);
                    }
                }
            }

            match failure {
                Some(e) => Err(e),
                None => Ok(wallets),
            }
        })
    }

    /// Returns the number of workers.
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Returns the total wallets generated across all batches.
    pub fn total_keys(&self) -> u64 {
        self.stats.total_keys()
    }
}

/// Splits `count` into at most `workers` non-empty, near-equal shares.
fn split_quota(count: usize, workers: usize) -> Vec<usize> {
    let workers = workers.min(count);
    if workers == 0 {
        return Vec::new();
    }

    let base = count / workers;
    let extra = count % workers;
    (0..workers)
        .map(|i| if i < extra { base + 1 } else { base })
        .collect()
}
