//! Player core
//!
//! The operations tasks execute against the shared context: buffer
//! attachment and backpressure, underflow recovery, format negotiation,
//! pipeline state transitions, timer management and buffer construction.
//! Every method here runs on the worker thread with exclusive access to the
//! context; the core itself holds only immutable collaborators and is safe
//! to share with timer callbacks for task submission.

use crate::backend::{
    BufferHandle, CapsField, PipelineBackend, PipelineState, ProtectionMeta, StateChangeResult,
};
use crate::client::PlayerClient;
use crate::config::Config;
use crate::player::context::PlayerContext;
use crate::player::task::PlayerTask;
use crate::player::tasks::{CheckAudioUnderflow, Play, ReportPosition};
use crate::player::timer::{TimerFactory, TimerKind};
use crate::player::worker::TaskQueue;
use mediabridge_common::{MediaSegment, MediaSourceType, NetworkState, PlaybackState};
use std::sync::Arc;
use tracing::{debug, error, warn};
use uuid::Uuid;

pub(crate) struct PlayerCore {
    pub(crate) session_id: Uuid,
    pub(crate) backend: Arc<dyn PipelineBackend>,
    pub(crate) client: Arc<dyn PlayerClient>,
    pub(crate) timer_factory: Arc<dyn TimerFactory>,
    pub(crate) queue: Arc<TaskQueue>,
    pub(crate) config: Config,
}

impl PlayerCore {
    pub(crate) fn new(
        session_id: Uuid,
        backend: Arc<dyn PipelineBackend>,
        client: Arc<dyn PlayerClient>,
        timer_factory: Arc<dyn TimerFactory>,
        queue: Arc<TaskQueue>,
        config: Config,
    ) -> Self {
        Self {
            session_id,
            backend,
            client,
            timer_factory,
            queue,
            config,
        }
    }

    /// Submit a task onto the queue. Used by tasks for nested submissions;
    /// the submitted task runs only after the current one returns.
    pub(crate) fn submit(&self, task: Box<dyn PlayerTask>) {
        self.queue.submit(task);
    }

    /// Stop the task queue. Remaining queued tasks are dropped; the worker
    /// runs context teardown and exits.
    pub(crate) fn stop_worker(&self) {
        self.queue.stop();
    }

    /// Attempt to push pending buffers of one source into its ingest point.
    ///
    /// No-op unless buffers are pending, the source signalled need-data and
    /// the ingest point is registered; buffers that cannot be attached stay
    /// queued (they are released at teardown, never dropped). On success the
    /// buffers are pushed in arrival order, and a cleared underflow may
    /// resume playback: once every configured source is underflow-free, a
    /// resume task is submitted and the one-time buffered notification goes
    /// out.
    pub(crate) fn attach_data(&self, ctx: &mut PlayerContext, source: MediaSourceType) {
        let cleared_underflow = {
            let stream = ctx.stream_mut(source);
            if stream.pending.is_empty() || !stream.need_data {
                return;
            }
            let Some(sink) = stream.sink else {
                debug!(%source, "attach deferred, ingest point not registered");
                return;
            };

            while let Some(buffer) = stream.pending.pop_front() {
                if !self.backend.push_buffer(sink, buffer.handle) {
                    warn!(%source, "ingest point rejected buffer");
                }
                let sample_end = buffer.timestamp.saturating_add(buffer.duration);
                stream.last_sample_time = Some(
                    stream
                        .last_sample_time
                        .map_or(sample_end, |t| t.max(sample_end)),
                );
            }

            if stream.underflow_active {
                stream.underflow_active = false;
                debug!(%source, "underflow cleared");
                true
            } else {
                false
            }
        };

        if cleared_underflow && ctx.all_underflows_cleared() {
            self.submit(Box::new(Play::new()));
        }
        self.maybe_notify_buffered(ctx);
    }

    /// One-time "buffered" notification, fired once every configured source
    /// has had data attached and none is starved. Covers both initial
    /// pre-roll and recovery from an underflow episode.
    fn maybe_notify_buffered(&self, ctx: &mut PlayerContext) {
        if ctx.buffered_notification_sent || !ctx.all_underflows_cleared() {
            return;
        }
        let all_fed = MediaSourceType::ALL
            .iter()
            .filter(|&&s| ctx.stream(s).sink.is_some())
            .all(|&s| ctx.stream(s).last_sample_time.is_some());
        if all_fed {
            ctx.buffered_notification_sent = true;
            self.client.notify_network_state(NetworkState::Buffered);
        }
    }

    /// Forward a need-data notification to the client, but only while the
    /// source still wants data.
    pub(crate) fn notify_need_media_data(&self, ctx: &PlayerContext, source: MediaSourceType) {
        if !ctx.stream(source).need_data {
            return;
        }
        if !self.client.notify_need_media_data(source) {
            debug!(%source, "client rejected need-data notification");
        }
    }

    /// Request a pipeline state change.
    ///
    /// A missing pipeline or a failing native call notifies a playback
    /// FAILURE and returns false. Success returns true with no notification
    /// — reaching the target state is reported elsewhere.
    pub(crate) fn change_pipeline_state(
        &self,
        ctx: &mut PlayerContext,
        state: PipelineState,
    ) -> bool {
        let Some(pipeline) = ctx.pipeline else {
            error!("cannot change state, pipeline is not available");
            self.client.notify_playback_state(PlaybackState::Failure);
            return false;
        };
        if self.backend.set_pipeline_state(pipeline, state) == StateChangeResult::Failure {
            error!(?state, "pipeline state change failed");
            self.client.notify_playback_state(PlaybackState::Failure);
            return false;
        }
        ctx.pipeline_state = state;
        true
    }

    /// Start the periodic position-report / audio-underflow-check timer.
    /// No-op while a live timer exists. The fire callback only submits
    /// tasks; it never touches the context.
    pub(crate) fn start_position_reporting_timer(&self, ctx: &mut PlayerContext) {
        if let Some(timer) = &ctx.position_timer {
            if timer.is_active() {
                return;
            }
        }
        let queue = Arc::clone(&self.queue);
        ctx.position_timer = self.timer_factory.create_timer(
            self.config.position_report_interval(),
            Box::new(move || {
                queue.submit(Box::new(ReportPosition::new()));
                queue.submit(Box::new(CheckAudioUnderflow::new()));
            }),
            TimerKind::Periodic,
        );
    }

    /// Cancel the position timer if one is running. Safe with no timer or
    /// an inactive one.
    pub(crate) fn stop_position_reporting_timer(&self, ctx: &mut PlayerContext) {
        if let Some(timer) = ctx.position_timer.take() {
            if timer.is_active() {
                timer.cancel();
            }
        }
    }

    /// Arm the one-shot source-setup-finish timer. No-op while one is
    /// already armed.
    pub(crate) fn schedule_source_setup_finish(&self, ctx: &mut PlayerContext) {
        if let Some(timer) = &ctx.setup_timer {
            if timer.is_active() {
                return;
            }
        }
        let queue = Arc::clone(&self.queue);
        ctx.setup_timer = self.timer_factory.create_timer(
            self.config.source_setup_timeout(),
            Box::new(move || {
                queue.submit(Box::new(crate::player::tasks::FinishSetupSource::new()));
            }),
            TimerKind::OneShot,
        );
    }

    /// Recompute and apply a stream's format descriptor.
    ///
    /// Each supplied value overrides the current descriptor's field only
    /// when it is valid (> 0); the descriptor is applied only if at least
    /// one field changed. The fetched descriptor and the working copy are
    /// each released exactly once, whatever happens.
    fn update_caps(
        &self,
        ctx: &PlayerContext,
        source: MediaSourceType,
        fields: [(CapsField, i32); 2],
    ) {
        let Some(sink) = ctx.stream(source).sink else {
            debug!(%source, "caps update skipped, ingest point not registered");
            return;
        };

        let current = self.backend.sink_caps(sink);
        let updated = self.backend.copy_caps(current);

        let mut changed = false;
        for (field, value) in fields {
            if value > 0 {
                self.backend.set_caps_field(updated, field, value);
                changed = true;
            }
        }
        if changed {
            self.backend.apply_caps(sink, updated);
        }

        self.backend.release_caps(current);
        self.backend.release_caps(updated);
    }

    pub(crate) fn update_audio_caps(&self, ctx: &PlayerContext, rate: i32, channels: i32) {
        self.update_caps(
            ctx,
            MediaSourceType::Audio,
            [(CapsField::Rate, rate), (CapsField::Channels, channels)],
        );
    }

    pub(crate) fn update_video_caps(&self, ctx: &PlayerContext, width: i32, height: i32) {
        self.update_caps(
            ctx,
            MediaSourceType::Video,
            [(CapsField::Width, width), (CapsField::Height, height)],
        );
    }

    /// Build a framework-native buffer for one sample segment.
    ///
    /// Timestamp and duration are always set. For encrypted segments the key
    /// id, initialization vector and subsample map are materialized as
    /// sub-buffers and attached as protection metadata; if the attach fails,
    /// the three sub-buffers are released and the data buffer is still
    /// returned.
    pub(crate) fn create_buffer(&self, segment: &MediaSegment) -> BufferHandle {
        let buffer = self.backend.alloc_buffer(segment.payload.len());
        self.backend.fill_buffer(buffer, &segment.payload);

        if let Some(protection) = &segment.protection {
            let key_id = self.backend.alloc_buffer(protection.key_id.len());
            self.backend.fill_buffer(key_id, &protection.key_id);

            let init_vector = self.backend.alloc_buffer(protection.init_vector.len());
            self.backend.fill_buffer(init_vector, &protection.init_vector);

            // Subsample map: big-endian u16 clear / u32 encrypted pairs.
            let mut subsample_map = Vec::with_capacity(protection.subsamples.len() * 6);
            for subsample in &protection.subsamples {
                subsample_map.extend_from_slice(&subsample.clear_bytes.to_be_bytes());
                subsample_map.extend_from_slice(&subsample.encrypted_bytes.to_be_bytes());
            }
            let subsamples = self.backend.alloc_buffer(subsample_map.len());
            self.backend.fill_buffer(subsamples, &subsample_map);

            let meta = ProtectionMeta {
                key_session_id: protection.key_session_id,
                subsample_count: protection.subsamples.len() as u32,
                init_with_last_15: protection.init_with_last_15,
                key_id,
                init_vector,
                subsamples,
            };
            if !self.backend.attach_protection_meta(buffer, &meta) {
                warn!(
                    key_session_id = protection.key_session_id,
                    "failed to attach protection metadata"
                );
                self.backend.release_buffer(key_id);
                self.backend.release_buffer(init_vector);
                self.backend.release_buffer(subsamples);
            }
        }

        self.backend
            .set_buffer_timing(buffer, segment.timestamp, segment.duration);
        buffer
    }

    /// Session teardown, run by the worker thread after the queue stops.
    /// Cancels timers, releases every still-pending buffer exactly once and
    /// drops the pipeline reference.
    pub(crate) fn teardown(&self, ctx: &mut PlayerContext) {
        self.stop_position_reporting_timer(ctx);
        if let Some(timer) = ctx.setup_timer.take() {
            if timer.is_active() {
                timer.cancel();
            }
        }

        for source in MediaSourceType::ALL {
            let stream = ctx.stream_mut(source);
            while let Some(buffer) = stream.pending.pop_front() {
                self.backend.release_buffer(buffer.handle);
            }
        }

        if let Some(pipeline) = ctx.pipeline.take() {
            self.backend.release_pipeline(pipeline);
        }
        debug!(session_id = %self.session_id, "player context torn down");
    }
}
