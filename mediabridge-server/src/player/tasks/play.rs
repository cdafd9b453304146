//! Start or resume playback.

use crate::backend::PipelineState;
use crate::player::context::PlayerContext;
use crate::player::core::PlayerCore;
use crate::player::task::PlayerTask;

pub(crate) struct Play;

impl Play {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl PlayerTask for Play {
    fn name(&self) -> &'static str {
        "play"
    }

    fn execute(&self, ctx: &mut PlayerContext, player: &PlayerCore) {
        if player.change_pipeline_state(ctx, PipelineState::Playing) {
            player.start_position_reporting_timer(ctx);
        }
    }
}
