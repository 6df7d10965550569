//! Rayon thread pool sizing for sweeps.

use rayon::ThreadPoolBuilder;

/// How many worker threads a sweep may use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerPool {
    /// 0 means the global Rayon pool (all cores).
    pub workers: usize,
}

impl WorkerPool {
    pub fn with_workers(n: usize) -> Self {
        Self { workers: n }
    }

    /// Run `f` with this worker count. Falls back to the global pool if a
    /// dedicated one cannot be built.
    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            return f();
        }
        match ThreadPoolBuilder::new().num_threads(self.workers).build() {
            Ok(pool) => pool.install(f),
            Err(err) => {
                tracing::warn!(workers = self.workers, %err, "thread pool build failed, using global pool");
                f()
            }
        }
    }
}
