//! Record which decode group serves a stream.
//!
//! The pipeline reports a decode group together with the format descriptor
//! it is wired for; the descriptor's media kind decides which slot the
//! group lands in. Wiring the elements themselves is the pipeline's
//! business, this is bookkeeping only.

use crate::backend::{CapsHandle, ElementHandle};
use crate::player::context::PlayerContext;
use crate::player::core::PlayerCore;
use crate::player::task::PlayerTask;
use mediabridge_common::MediaSourceType;
use tracing::debug;

pub(crate) struct UpdatePlaybackGroup {
    element: ElementHandle,
    caps: CapsHandle,
}

impl UpdatePlaybackGroup {
    pub(crate) fn new(element: ElementHandle, caps: CapsHandle) -> Self {
        Self { element, caps }
    }
}

impl PlayerTask for UpdatePlaybackGroup {
    fn name(&self) -> &'static str {
        "update-playback-group"
    }

    fn execute(&self, ctx: &mut PlayerContext, player: &PlayerCore) {
        match player.backend.caps_media_kind(self.caps) {
            Some(MediaSourceType::Audio) => {
                ctx.playback_group.audio_decode_group = Some(self.element);
            }
            Some(MediaSourceType::Video) => {
                ctx.playback_group.video_decode_group = Some(self.element);
            }
            None => debug!("decode group reported with unclassifiable caps, ignored"),
        }
    }
}
