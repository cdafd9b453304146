//! Pause playback. The position timer keeps running; position reports
//! simply stop moving while paused.

use crate::backend::PipelineState;
use crate::player::context::PlayerContext;
use crate::player::core::PlayerCore;
use crate::player::task::PlayerTask;

pub(crate) struct Pause;

impl Pause {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl PlayerTask for Pause {
    fn name(&self) -> &'static str {
        "pause"
    }

    fn execute(&self, ctx: &mut PlayerContext, player: &PlayerCore) {
        player.change_pipeline_state(ctx, PipelineState::Paused);
    }
}
