//! Renegotiate the audio stream format.

use crate::player::context::PlayerContext;
use crate::player::core::PlayerCore;
use crate::player::task::PlayerTask;

pub(crate) struct UpdateAudioFormat {
    rate: i32,
    channels: i32,
}

impl UpdateAudioFormat {
    pub(crate) fn new(rate: i32, channels: i32) -> Self {
        Self { rate, channels }
    }
}

impl PlayerTask for UpdateAudioFormat {
    fn name(&self) -> &'static str {
        "update-audio-format"
    }

    fn execute(&self, ctx: &mut PlayerContext, player: &PlayerCore) {
        player.update_audio_caps(ctx, self.rate, self.channels);
    }
}
