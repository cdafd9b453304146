//! Task queue and worker thread
//!
//! Single-consumer queue: tasks submitted from any thread are executed
//! strictly in arrival order, one at a time to completion, on one dedicated
//! worker thread. This makes the player context single-writer without locks
//! around its fields.

use crate::error::{Error, Result};
use crate::player::context::PlayerContext;
use crate::player::core::PlayerCore;
use crate::player::task::PlayerTask;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use tracing::{debug, trace};

/// Shared queue state between producers and the worker thread
pub(crate) struct TaskQueue {
    tasks: Mutex<VecDeque<Box<dyn PlayerTask>>>,
    condvar: Condvar,
    stopped: AtomicBool,
}

impl TaskQueue {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            tasks: Mutex::new(VecDeque::new()),
            condvar: Condvar::new(),
            stopped: AtomicBool::new(false),
        })
    }

    /// Enqueue a task. Callable from any thread; never blocks beyond the
    /// queue lock. Tasks submitted after `stop` are discarded.
    pub(crate) fn submit(&self, task: Box<dyn PlayerTask>) {
        if self.stopped.load(Ordering::SeqCst) {
            debug!(task = task.name(), "queue stopped, task discarded");
            return;
        }
        let mut tasks = self.tasks.lock().unwrap();
        tasks.push_back(task);
        self.condvar.notify_one();
    }

    /// Stop the queue. Idempotent. The worker finishes the task currently
    /// executing and exits without draining the remainder.
    pub(crate) fn stop(&self) {
        if self.stopped.swap(true, Ordering::SeqCst) {
            return;
        }
        debug!("task queue stopping");
        self.condvar.notify_all();
    }

    /// Blocking pop; `None` once the queue is stopped.
    fn wait_next(&self) -> Option<Box<dyn PlayerTask>> {
        let mut tasks = self.tasks.lock().unwrap();
        loop {
            if self.stopped.load(Ordering::SeqCst) {
                return None;
            }
            if let Some(task) = tasks.pop_front() {
                return Some(task);
            }
            tasks = self.condvar.wait(tasks).unwrap();
        }
    }

    #[cfg(test)]
    pub(crate) fn drain(&self) -> Vec<Box<dyn PlayerTask>> {
        self.tasks.lock().unwrap().drain(..).collect()
    }
}

/// Owns the worker thread executing tasks against the player context.
///
/// The thread takes ownership of the context for the whole session; after
/// the queue stops, it runs context teardown (buffer release, timer
/// cancellation) before exiting.
pub(crate) struct WorkerThread {
    queue: Arc<TaskQueue>,
    handle: Option<JoinHandle<()>>,
}

impl WorkerThread {
    pub(crate) fn spawn(
        queue: Arc<TaskQueue>,
        mut ctx: PlayerContext,
        core: Arc<PlayerCore>,
    ) -> Result<Self> {
        let worker_queue = Arc::clone(&queue);
        let handle = thread::Builder::new()
            .name("player-worker".to_string())
            .spawn(move || {
                debug!("worker thread started");
                while let Some(task) = worker_queue.wait_next() {
                    trace!(task = task.name(), "executing task");
                    task.execute(&mut ctx, &core);
                }
                core.teardown(&mut ctx);
                debug!("worker thread finished");
            })
            .map_err(|e| Error::Playback(format!("cannot spawn worker thread: {}", e)))?;

        Ok(Self {
            queue,
            handle: Some(handle),
        })
    }

    /// Wait for the worker to exit without forcing the queue down. Only
    /// sensible once a stop is already on its way (e.g. a queued shutdown
    /// task).
    pub(crate) fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Stop the queue and wait for the worker to exit. Idempotent.
    pub(crate) fn stop_and_join(&mut self) {
        self.queue.stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for WorkerThread {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}
