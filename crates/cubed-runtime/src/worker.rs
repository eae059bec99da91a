use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::pool::JobSlotPool;

/// The single background thread that runs mesh jobs out of a [`JobSlotPool`].
pub struct Worker {
    keep_running: Arc<AtomicBool>,
    pool: Arc<JobSlotPool>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    pub fn spawn(pool: Arc<JobSlotPool>, idle: Duration) -> io::Result<Self> {
        let keep_running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&keep_running);
        let worker_pool = Arc::clone(&pool);
        let handle = thread::Builder::new()
            .name("cubed-mesh-worker".into())
            .spawn(move || {
                log::info!(target: "worker", "mesh worker started (idle wait {:?})", idle);
                let mut jobs: u64 = 0;
                while flag.load(Ordering::Acquire) {
                    if worker_pool.run_next() {
                        jobs += 1;
                    } else {
                        worker_pool.wait_for_work(idle);
                    }
                }
                log::info!(target: "worker", "mesh worker stopped after {} jobs", jobs);
            })?;
        Ok(Self {
            keep_running,
            pool,
            handle: Some(handle),
        })
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Clears the keep-running flag, wakes the thread if it is idle, and joins it.
    /// Idempotent.
    pub fn shutdown(&mut self) {
        self.keep_running.store(false, Ordering::Release);
        self.pool.wake();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!(target: "worker", "mesh worker panicked");
            }
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
