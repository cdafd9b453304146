//! Complete source setup after the registration quiet period.
//!
//! Marks setup finished and primes every registered stream: the need-data
//! flag goes up and the client receives the initial request for data.

use crate::player::context::PlayerContext;
use crate::player::core::PlayerCore;
use crate::player::task::PlayerTask;
use mediabridge_common::MediaSourceType;
use tracing::debug;

pub(crate) struct FinishSetupSource;

impl FinishSetupSource {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl PlayerTask for FinishSetupSource {
    fn name(&self) -> &'static str {
        "finish-setup-source"
    }

    fn execute(&self, ctx: &mut PlayerContext, player: &PlayerCore) {
        if ctx.setup_finished {
            return;
        }
        debug!("source setup finished");
        ctx.setup_finished = true;
        ctx.setup_timer = None;

        for source in MediaSourceType::ALL {
            if ctx.stream(source).sink.is_some() {
                ctx.stream_mut(source).need_data = true;
                player.notify_need_media_data(ctx, source);
            }
        }
    }
}
