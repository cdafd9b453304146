//! Task abstraction
//!
//! Every mutation of the player context is expressed as a task. Tasks are
//! immutable after construction, capture their exact inputs at trigger time,
//! and execute exactly once on the worker thread. Domain failures are
//! handled inside `execute` — logged or reported through the client
//! notifier — never propagated to the queue.

use crate::player::context::PlayerContext;
use crate::player::core::PlayerCore;

/// A unit of work executed by the worker thread.
///
/// `execute` receives exclusive access to the context for its own duration
/// only; tasks must not stash the reference. Submitting further tasks from
/// inside `execute` is allowed — they re-enter the queue and run after the
/// current task returns.
pub trait PlayerTask: Send {
    /// Short name used in worker-thread logs.
    fn name(&self) -> &'static str;

    fn execute(&self, ctx: &mut PlayerContext, player: &PlayerCore);
}
