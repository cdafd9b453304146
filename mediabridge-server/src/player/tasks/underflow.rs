//! A stream ran dry.
//!
//! Starts an underflow episode for the source: playback is paused and the
//! client is told the session stalled. Re-reports for a source already in
//! underflow are ignored, and a second source running dry joins the
//! episode already in progress, so one episode produces one pause and one
//! stall notification however many sources starve.

use crate::backend::PipelineState;
use crate::player::context::PlayerContext;
use crate::player::core::PlayerCore;
use crate::player::task::PlayerTask;
use mediabridge_common::{MediaSourceType, NetworkState};
use tracing::warn;

pub(crate) struct Underflow {
    source: MediaSourceType,
}

impl Underflow {
    pub(crate) fn new(source: MediaSourceType) -> Self {
        Self { source }
    }
}

impl PlayerTask for Underflow {
    fn name(&self) -> &'static str {
        "underflow"
    }

    fn execute(&self, ctx: &mut PlayerContext, player: &PlayerCore) {
        if ctx.stream(self.source).underflow_active {
            return;
        }
        warn!(source = %self.source, "stream underflow");
        let episode_in_progress = ctx.any_underflow_active();
        ctx.stream_mut(self.source).underflow_active = true;
        // A new episode re-arms the one-time buffered notification.
        ctx.buffered_notification_sent = false;

        if !episode_in_progress {
            player.change_pipeline_state(ctx, PipelineState::Paused);
            player.client.notify_network_state(NetworkState::Stalled);
        }
    }
}
