//! Detect a silently starved audio stream.
//!
//! Some audio sinks keep consuming wall-clock time without ever raising an
//! underflow signal. This task, run on every position-timer tick, compares
//! the playback position against the end timestamp of the newest pushed
//! audio sample; once the position runs past it by more than the configured
//! stall threshold with nothing left to push, the stream is declared
//! underflowed.

use crate::backend::PipelineState;
use crate::player::context::PlayerContext;
use crate::player::core::PlayerCore;
use crate::player::task::PlayerTask;
use crate::player::tasks::Underflow;
use mediabridge_common::MediaSourceType;
use tracing::debug;

pub(crate) struct CheckAudioUnderflow;

impl CheckAudioUnderflow {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl PlayerTask for CheckAudioUnderflow {
    fn name(&self) -> &'static str {
        "check-audio-underflow"
    }

    fn execute(&self, ctx: &mut PlayerContext, player: &PlayerCore) {
        if ctx.pipeline_state != PipelineState::Playing {
            return;
        }
        let audio = ctx.stream(MediaSourceType::Audio);
        if audio.sink.is_none() || audio.underflow_active || !audio.pending.is_empty() {
            return;
        }
        let Some(last_sample_time) = audio.last_sample_time else {
            return;
        };
        let Some(pipeline) = ctx.pipeline else {
            return;
        };
        let Some(position) = player.backend.query_position(pipeline) else {
            return;
        };

        if position > last_sample_time.saturating_add(player.config.audio_stall_threshold_ns()) {
            debug!(
                position,
                last_sample_time, "audio position ran past the queued samples"
            );
            player.submit(Box::new(Underflow::new(MediaSourceType::Audio)));
        }
    }
}
