use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Condvar, Mutex, PoisonError};

use log::debug;

/// Cooperative cancellation flag shared between a caller and its workers.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Counts worker threads that have shut down.
#[derive(Default)]
struct ExitLatch {
    exited: Mutex<usize>,
    cond: Condvar,
}

impl ExitLatch {
    fn count_down(&self) {
        let mut exited = self.exited.lock().unwrap_or_else(PoisonError::into_inner);
        *exited += 1;
        self.cond.notify_all();
    }

    fn wait_for(&self, threads: usize) {
        let mut exited = self.exited.lock().unwrap_or_else(PoisonError::into_inner);
        while *exited < threads {
            exited = self
                .cond
                .wait(exited)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

/// A fixed-size pool of worker threads running independent jobs.
///
/// Each submitted job gets the pool's [`CancelToken`] and is expected to check
/// it regularly. [`join`](WorkerPool::join) is the only synchronisation point:
/// it returns once every dispatched job has reported back and every worker
/// thread has exited.
pub struct WorkerPool<T> {
    pool: Option<rayon::ThreadPool>,
    threads: usize,
    latch: Arc<ExitLatch>,
    cancel: CancelToken,
    sender: Option<Sender<T>>,
    receiver: Receiver<T>,
    submitted: usize,
}

impl<T: Send + 'static> WorkerPool<T> {
    pub fn new(threads: usize, cancel: CancelToken) -> Result<WorkerPool<T>, rayon::ThreadPoolBuildError> {
        let latch = Arc::new(ExitLatch::default());
        let on_exit = Arc::clone(&latch);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("opener-worker-{}", i))
            .exit_handler(move |_| on_exit.count_down())
            .build()?;

        let (sender, receiver) = mpsc::channel();
        Ok(WorkerPool {
            pool: Some(pool),
            threads,
            latch,
            cancel,
            sender: Some(sender),
            receiver,
            submitted: 0,
        })
    }

    /// Dispatches `job` to the next free worker. Returns `false`, without
    /// dispatching, once the pool has been cancelled.
    pub fn submit<F>(&mut self, job: F) -> bool
    where
        F: FnOnce(&CancelToken) -> T + Send + 'static,
    {
        let (pool, sender) = match (&self.pool, &self.sender) {
            (Some(pool), Some(sender)) if !self.cancel.is_cancelled() => (pool, sender.clone()),
            _ => return false,
        };

        let cancel = self.cancel.clone();
        pool.spawn(move || {
            // the receiver lives until every submitted job has reported
            let _ = sender.send(job(&cancel));
        });
        self.submitted += 1;
        true
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn submitted(&self) -> usize {
        self.submitted
    }

    /// Waits for every dispatched job, then tears the worker threads down.
    /// Results arrive in completion order.
    pub fn join(mut self) -> Vec<T> {
        drop(self.sender.take());
        let results = self.receiver.iter().take(self.submitted).collect::<Vec<_>>();

        if let Some(pool) = self.pool.take() {
            drop(pool);
            self.latch.wait_for(self.threads);
        }
        debug!(
            "worker pool joined: {} of {} jobs reported",
            results.len(),
            self.submitted
        );
        results
    }
}

impl<T> Drop for WorkerPool<T> {
    fn drop(&mut self) {
        // dropped without join (e.g. an early return): tell running jobs to stop
        if self.pool.is_some() {
            self.cancel.cancel();
        }
    }
}
