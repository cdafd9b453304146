//! Register a stream's ingest point.
//!
//! Each registration re-arms the one-shot setup-finish timer, so setup
//! completes a fixed delay after the *last* source arrives.

use crate::backend::SinkHandle;
use crate::player::context::PlayerContext;
use crate::player::core::PlayerCore;
use crate::player::task::PlayerTask;
use mediabridge_common::MediaSourceType;
use tracing::debug;

pub(crate) struct SetupSource {
    source: MediaSourceType,
    sink: SinkHandle,
}

impl SetupSource {
    pub(crate) fn new(source: MediaSourceType, sink: SinkHandle) -> Self {
        Self { source, sink }
    }
}

impl PlayerTask for SetupSource {
    fn name(&self) -> &'static str {
        "setup-source"
    }

    fn execute(&self, ctx: &mut PlayerContext, player: &PlayerCore) {
        debug!(source = %self.source, "ingest point registered");
        ctx.stream_mut(self.source).sink = Some(self.sink);

        if let Some(timer) = ctx.setup_timer.take() {
            if timer.is_active() {
                timer.cancel();
            }
        }
        player.schedule_source_setup_finish(ctx);
    }
}
