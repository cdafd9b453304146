//! Periodic position report, fired from the position timer.

use crate::player::context::PlayerContext;
use crate::player::core::PlayerCore;
use crate::player::task::PlayerTask;
use tracing::trace;

pub(crate) struct ReportPosition;

impl ReportPosition {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl PlayerTask for ReportPosition {
    fn name(&self) -> &'static str {
        "report-position"
    }

    fn execute(&self, ctx: &mut PlayerContext, player: &PlayerCore) {
        let Some(pipeline) = ctx.pipeline else {
            return;
        };
        match player.backend.query_position(pipeline) {
            Some(position_ns) => player.client.notify_position(position_ns),
            None => trace!("position query failed, report skipped"),
        }
    }
}
