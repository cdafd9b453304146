//! An ingest point signalled it is ready for more data.

use crate::player::context::PlayerContext;
use crate::player::core::PlayerCore;
use crate::player::task::PlayerTask;
use mediabridge_common::MediaSourceType;
use tracing::debug;

pub(crate) struct NeedData {
    source: MediaSourceType,
}

impl NeedData {
    pub(crate) fn new(source: MediaSourceType) -> Self {
        Self { source }
    }
}

impl PlayerTask for NeedData {
    fn name(&self) -> &'static str {
        "need-data"
    }

    fn execute(&self, ctx: &mut PlayerContext, player: &PlayerCore) {
        debug!(source = %self.source, "ingest point requests data");
        ctx.stream_mut(self.source).need_data = true;
        player.attach_data(ctx, self.source);
        player.notify_need_media_data(ctx, self.source);
    }
}
