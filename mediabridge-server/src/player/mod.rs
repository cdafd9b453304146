//! Playback session engine
//!
//! A [`SessionPlayer`] owns one pipeline, one worker thread and one task
//! queue. Every public method builds a task capturing its arguments and
//! submits it; all context mutation happens on the worker thread, strictly
//! in submission order.

pub(crate) mod context;
pub(crate) mod core;
pub(crate) mod task;
pub(crate) mod tasks;
pub mod timer;
pub(crate) mod worker;

#[cfg(test)]
pub(crate) mod test_support;

use crate::backend::{CapsHandle, ElementHandle, PipelineBackend, SinkHandle};
use crate::client::PlayerClient;
use crate::config::Config;
use crate::error::Result;
use crate::player::context::PlayerContext;
use crate::player::core::PlayerCore;
use crate::player::tasks::{
    AttachSamples, EnoughData, NeedData, Pause, Play, SetupSource, Shutdown, Stop, Underflow,
    UpdateAudioFormat, UpdatePlaybackGroup, UpdateVideoFormat,
};
use crate::player::timer::TimerFactory;
use crate::player::worker::{TaskQueue, WorkerThread};
use mediabridge_common::{MediaSegment, MediaSourceType};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// One playback session.
///
/// Dropping the player submits a shutdown task, lets already-queued work
/// drain, and joins the worker thread.
pub struct SessionPlayer {
    session_id: Uuid,
    core: Arc<PlayerCore>,
    worker: WorkerThread,
}

impl SessionPlayer {
    pub fn new(
        session_id: Uuid,
        backend: Arc<dyn PipelineBackend>,
        client: Arc<dyn PlayerClient>,
        timer_factory: Arc<dyn TimerFactory>,
        config: &Config,
    ) -> Result<Self> {
        let pipeline = backend.create_pipeline();
        if pipeline.is_none() {
            // Tolerated: every state-change attempt will report a failure.
            warn!(%session_id, "pipeline creation failed");
        }
        let ctx = PlayerContext::new(pipeline);

        let queue = TaskQueue::new();
        let core = Arc::new(PlayerCore::new(
            session_id,
            backend,
            client,
            timer_factory,
            Arc::clone(&queue),
            config.clone(),
        ));
        let worker = WorkerThread::spawn(queue, ctx, Arc::clone(&core))?;

        info!(%session_id, "playback session created");
        Ok(Self {
            session_id,
            core,
            worker,
        })
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn play(&self) {
        self.core.submit(Box::new(Play::new()));
    }

    pub fn pause(&self) {
        self.core.submit(Box::new(Pause::new()));
    }

    pub fn stop(&self) {
        self.core.submit(Box::new(Stop::new()));
    }

    /// Hand a batch of sample segments to the session. Segments are queued
    /// per source and pushed to the pipeline as soon as it wants them.
    pub fn attach_samples(&self, segments: Vec<MediaSegment>) {
        self.core.submit(Box::new(AttachSamples::new(segments)));
    }

    /// Register the ingest point for a source.
    pub fn attach_source(&self, source: MediaSourceType, sink: SinkHandle) {
        self.core.submit(Box::new(SetupSource::new(source, sink)));
    }

    pub fn set_audio_format(&self, rate: i32, channels: i32) {
        self.core
            .submit(Box::new(UpdateAudioFormat::new(rate, channels)));
    }

    pub fn set_video_format(&self, width: i32, height: i32) {
        self.core
            .submit(Box::new(UpdateVideoFormat::new(width, height)));
    }

    /// The pipeline asked for more data on a source.
    pub fn report_need_data(&self, source: MediaSourceType) {
        self.core.submit(Box::new(NeedData::new(source)));
    }

    /// The pipeline has enough data on a source for now.
    pub fn report_enough_data(&self, source: MediaSourceType) {
        self.core.submit(Box::new(EnoughData::new(source)));
    }

    /// A source ran dry.
    pub fn report_underflow(&self, source: MediaSourceType) {
        self.core.submit(Box::new(Underflow::new(source)));
    }

    /// The pipeline reported the decode group wired for some caps.
    pub fn update_playback_group(&self, element: ElementHandle, caps: CapsHandle) {
        self.core
            .submit(Box::new(UpdatePlaybackGroup::new(element, caps)));
    }
}

impl Drop for SessionPlayer {
    fn drop(&mut self) {
        // The shutdown task stops the queue from the worker thread, so work
        // submitted before this point still runs.
        self.core.submit(Box::new(Shutdown::new()));
        self.worker.join();
        info!(session_id = %self.session_id, "playback session closed");
    }
}
