//! Renegotiate the video stream format.

use crate::player::context::PlayerContext;
use crate::player::core::PlayerCore;
use crate::player::task::PlayerTask;

pub(crate) struct UpdateVideoFormat {
    width: i32,
    height: i32,
}

impl UpdateVideoFormat {
    pub(crate) fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl PlayerTask for UpdateVideoFormat {
    fn name(&self) -> &'static str {
        "update-video-format"
    }

    fn execute(&self, ctx: &mut PlayerContext, player: &PlayerCore) {
        player.update_video_caps(ctx, self.width, self.height);
    }
}
