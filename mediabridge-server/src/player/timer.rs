//! Timer service
//!
//! One-shot and periodic timers backed by their own thread. Timer callbacks
//! run on the timer thread and must never touch the player context; the
//! engine only ever uses them to submit tasks onto the queue.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::warn;

/// Timer firing modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    OneShot,
    Periodic,
}

/// One scheduled callback
///
/// A periodic timer stays active until cancelled; a one-shot timer goes
/// inactive after firing once. `cancel` on an inactive timer is a no-op.
pub trait Timer: Send {
    fn is_active(&self) -> bool;
    fn cancel(&self);
}

/// Creates timers. `None` on failure; all call sites treat a missing timer
/// as "not active".
pub trait TimerFactory: Send + Sync {
    fn create_timer(
        &self,
        timeout: Duration,
        callback: Box<dyn Fn() + Send>,
        kind: TimerKind,
    ) -> Option<Box<dyn Timer>>;
}

struct TimerShared {
    cancelled: Mutex<bool>,
    condvar: Condvar,
    active: AtomicBool,
}

/// Thread-backed [`Timer`] implementation
pub struct ThreadTimer {
    shared: Arc<TimerShared>,
    thread: Option<JoinHandle<()>>,
}

impl ThreadTimer {
    fn spawn(timeout: Duration, callback: Box<dyn Fn() + Send>, kind: TimerKind) -> Option<Self> {
        let shared = Arc::new(TimerShared {
            cancelled: Mutex::new(false),
            condvar: Condvar::new(),
            active: AtomicBool::new(true),
        });

        let thread_shared = Arc::clone(&shared);
        let thread = thread::Builder::new()
            .name("timer".to_string())
            .spawn(move || Self::run(thread_shared, timeout, callback, kind));

        match thread {
            Ok(handle) => Some(Self {
                shared,
                thread: Some(handle),
            }),
            Err(e) => {
                warn!("failed to spawn timer thread: {}", e);
                None
            }
        }
    }

    fn run(
        shared: Arc<TimerShared>,
        timeout: Duration,
        callback: Box<dyn Fn() + Send>,
        kind: TimerKind,
    ) {
        // The cancelled flag must be checked before every wait: a cancel
        // landing before this thread first takes the lock has already
        // issued its notify, and waiting would sleep the full interval.
        let mut cancelled = shared.cancelled.lock().unwrap();
        'armed: loop {
            let deadline = Instant::now() + timeout;
            while !*cancelled {
                let now = Instant::now();
                if now >= deadline {
                    drop(cancelled);
                    callback();
                    if kind == TimerKind::OneShot {
                        shared.active.store(false, Ordering::SeqCst);
                        return;
                    }
                    cancelled = shared.cancelled.lock().unwrap();
                    continue 'armed;
                }
                // Spurious wakeups re-wait on the remaining time only.
                let (guard, _) = shared
                    .condvar
                    .wait_timeout(cancelled, deadline - now)
                    .unwrap();
                cancelled = guard;
            }
            break;
        }
        shared.active.store(false, Ordering::SeqCst);
    }
}

impl Timer for ThreadTimer {
    fn is_active(&self) -> bool {
        self.shared.active.load(Ordering::SeqCst)
    }

    fn cancel(&self) {
        let mut cancelled = self.shared.cancelled.lock().unwrap();
        *cancelled = true;
        self.shared.active.store(false, Ordering::SeqCst);
        self.shared.condvar.notify_all();
    }
}

impl Drop for ThreadTimer {
    fn drop(&mut self) {
        self.cancel();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

/// Default [`TimerFactory`] spawning [`ThreadTimer`]s
pub struct ThreadTimerFactory;

impl TimerFactory for ThreadTimerFactory {
    fn create_timer(
        &self,
        timeout: Duration,
        callback: Box<dyn Fn() + Send>,
        kind: TimerKind,
    ) -> Option<Box<dyn Timer>> {
        ThreadTimer::spawn(timeout, callback, kind).map(|t| Box::new(t) as Box<dyn Timer>)
    }
}
