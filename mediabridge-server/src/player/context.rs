//! Shared player context
//!
//! One instance per playback session, owned by the worker thread. No code
//! path outside an executing task may read or write these fields — that
//! invariant is what makes the lock-free single-writer model sound.

use crate::backend::{BufferHandle, ElementHandle, PipelineHandle, PipelineState, SinkHandle};
use crate::player::timer::Timer;
use mediabridge_common::MediaSourceType;
use std::collections::VecDeque;

/// A sample buffer received from the client but not yet pushed to its
/// ingest point. Timing is kept alongside the handle for underflow
/// detection.
#[derive(Debug, Clone, Copy)]
pub(crate) struct QueuedBuffer {
    pub handle: BufferHandle,
    pub timestamp: i64,
    pub duration: i64,
}

/// Per-source backpressure and buffering state
#[derive(Default)]
pub(crate) struct StreamState {
    /// Ingest point, absent until source setup registers it
    pub sink: Option<SinkHandle>,
    /// True while the ingest point is ready to accept the next buffer
    pub need_data: bool,
    /// Buffers received but not yet attached, FIFO
    pub pending: VecDeque<QueuedBuffer>,
    /// True while this stream is starved
    pub underflow_active: bool,
    /// End timestamp (ns) of the newest sample pushed to the ingest point
    pub last_sample_time: Option<i64>,
}

/// Decode-group bookkeeping maintained by the UpdatePlaybackGroup task
#[derive(Default)]
pub(crate) struct PlaybackGroup {
    pub audio_decode_group: Option<ElementHandle>,
    pub video_decode_group: Option<ElementHandle>,
}

/// Mutable state of one playback session.
///
/// Created when the session is established, torn down by the worker thread
/// when the queue stops; teardown releases every still-pending buffer.
pub(crate) struct PlayerContext {
    /// Native pipeline; `None` means any state-change attempt fails
    pub pipeline: Option<PipelineHandle>,
    /// Last state successfully requested from the pipeline
    pub pipeline_state: PipelineState,
    pub audio: StreamState,
    pub video: StreamState,
    /// Guards the one-time "buffered" notification per underflow episode
    pub buffered_notification_sent: bool,
    /// Set once the setup-finish task has run
    pub setup_finished: bool,
    pub playback_group: PlaybackGroup,
    /// Periodic position-report / underflow-check timer, when running
    pub position_timer: Option<Box<dyn Timer>>,
    /// One-shot setup-completion timer, when armed
    pub setup_timer: Option<Box<dyn Timer>>,
}

impl PlayerContext {
    pub(crate) fn new(pipeline: Option<PipelineHandle>) -> Self {
        Self {
            pipeline,
            pipeline_state: PipelineState::Null,
            audio: StreamState::default(),
            video: StreamState::default(),
            buffered_notification_sent: false,
            setup_finished: false,
            playback_group: PlaybackGroup::default(),
            position_timer: None,
            setup_timer: None,
        }
    }

    pub(crate) fn stream(&self, source: MediaSourceType) -> &StreamState {
        match source {
            MediaSourceType::Audio => &self.audio,
            MediaSourceType::Video => &self.video,
        }
    }

    pub(crate) fn stream_mut(&mut self, source: MediaSourceType) -> &mut StreamState {
        match source {
            MediaSourceType::Audio => &mut self.audio,
            MediaSourceType::Video => &mut self.video,
        }
    }

    /// True while an underflow episode is in progress on any source.
    pub(crate) fn any_underflow_active(&self) -> bool {
        MediaSourceType::ALL
            .iter()
            .any(|&s| self.stream(s).underflow_active)
    }

    /// True when every source with a configured stream has cleared its
    /// underflow flag. Sources without a registered ingest point never
    /// count as underflowing.
    pub(crate) fn all_underflows_cleared(&self) -> bool {
        MediaSourceType::ALL
            .iter()
            .filter(|&&s| self.stream(s).sink.is_some())
            .all(|&s| !self.stream(s).underflow_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_sources_never_block_the_underflow_gate() {
        let mut ctx = PlayerContext::new(Some(PipelineHandle(1)));
        assert!(ctx.all_underflows_cleared());

        ctx.audio.sink = Some(SinkHandle(2));
        ctx.audio.underflow_active = true;
        assert!(!ctx.all_underflows_cleared());

        // Video has no sink; its flag must be irrelevant.
        ctx.audio.underflow_active = false;
        ctx.video.underflow_active = true;
        assert!(ctx.all_underflows_cleared());
    }
}
