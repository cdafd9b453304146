//! End the session.
//!
//! Stops the task queue: tasks still queued behind this one are dropped
//! unexecuted, and the worker runs context teardown before exiting.

use crate::player::context::PlayerContext;
use crate::player::core::PlayerCore;
use crate::player::task::PlayerTask;
use tracing::debug;

pub(crate) struct Shutdown;

impl Shutdown {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl PlayerTask for Shutdown {
    fn name(&self) -> &'static str {
        "shutdown"
    }

    fn execute(&self, _ctx: &mut PlayerContext, player: &PlayerCore) {
        debug!("session shutdown requested");
        player.stop_worker();
    }
}
