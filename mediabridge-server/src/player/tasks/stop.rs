//! Stop playback and quiesce the session.

use crate::backend::PipelineState;
use crate::player::context::PlayerContext;
use crate::player::core::PlayerCore;
use crate::player::task::PlayerTask;
use mediabridge_common::MediaSourceType;

pub(crate) struct Stop;

impl Stop {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl PlayerTask for Stop {
    fn name(&self) -> &'static str {
        "stop"
    }

    fn execute(&self, ctx: &mut PlayerContext, player: &PlayerCore) {
        player.stop_position_reporting_timer(ctx);
        for source in MediaSourceType::ALL {
            ctx.stream_mut(source).need_data = false;
        }
        player.change_pipeline_state(ctx, PipelineState::Null);
    }
}
