//! An ingest point signalled it has enough data for now.

use crate::player::context::PlayerContext;
use crate::player::core::PlayerCore;
use crate::player::task::PlayerTask;
use mediabridge_common::MediaSourceType;
use tracing::debug;

pub(crate) struct EnoughData {
    source: MediaSourceType,
}

impl EnoughData {
    pub(crate) fn new(source: MediaSourceType) -> Self {
        Self { source }
    }
}

impl PlayerTask for EnoughData {
    fn name(&self) -> &'static str {
        "enough-data"
    }

    fn execute(&self, ctx: &mut PlayerContext, _player: &PlayerCore) {
        debug!(source = %self.source, "ingest point saturated");
        ctx.stream_mut(self.source).need_data = false;
    }
}
