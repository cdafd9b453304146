//! Stand-in pipeline backend
//!
//! Used by the bundled binary for bring-up and by examples. Mints handles,
//! logs every operation and simulates a playback clock so the position
//! reporting path has something to report. The production backend wrapping
//! the real multimedia framework lives in the platform integration crate.

use super::{
    BufferHandle, CapsField, CapsHandle, PipelineBackend, PipelineHandle, PipelineState,
    ProtectionMeta, SinkHandle, StateChangeResult,
};
use mediabridge_common::MediaSourceType;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Instant;
use tracing::debug;

#[derive(Debug)]
struct Clock {
    state: PipelineState,
    /// Position accumulated during previous Playing intervals, in ns
    accumulated_ns: i64,
    /// Start of the current Playing interval, if playing
    playing_since: Option<Instant>,
}

/// Logging backend with a simulated position clock
pub struct StubBackend {
    next_handle: AtomicU64,
    clock: Mutex<Clock>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self {
            next_handle: AtomicU64::new(1),
            clock: Mutex::new(Clock {
                state: PipelineState::Null,
                accumulated_ns: 0,
                playing_since: None,
            }),
        }
    }

    fn mint(&self) -> u64 {
        self.next_handle.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for StubBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineBackend for StubBackend {
    fn create_pipeline(&self) -> Option<PipelineHandle> {
        let handle = PipelineHandle(self.mint());
        debug!(?handle, "stub: pipeline created");
        Some(handle)
    }

    fn release_pipeline(&self, pipeline: PipelineHandle) {
        debug!(?pipeline, "stub: pipeline released");
    }

    fn set_pipeline_state(
        &self,
        pipeline: PipelineHandle,
        state: PipelineState,
    ) -> StateChangeResult {
        debug!(?pipeline, ?state, "stub: state change");
        let mut clock = self.clock.lock().unwrap();
        match (clock.state, state) {
            (PipelineState::Playing, PipelineState::Playing) => {}
            (_, PipelineState::Playing) => clock.playing_since = Some(Instant::now()),
            (PipelineState::Playing, _) => {
                if let Some(since) = clock.playing_since.take() {
                    clock.accumulated_ns += since.elapsed().as_nanos() as i64;
                }
            }
            _ => {}
        }
        clock.state = state;
        StateChangeResult::Success
    }

    fn query_position(&self, _pipeline: PipelineHandle) -> Option<i64> {
        let clock = self.clock.lock().unwrap();
        let running = clock
            .playing_since
            .map(|since| since.elapsed().as_nanos() as i64)
            .unwrap_or(0);
        Some(clock.accumulated_ns + running)
    }

    fn alloc_buffer(&self, len: usize) -> BufferHandle {
        let handle = BufferHandle(self.mint());
        debug!(?handle, len, "stub: buffer allocated");
        handle
    }

    fn fill_buffer(&self, _buffer: BufferHandle, _data: &[u8]) {}

    fn set_buffer_timing(&self, _buffer: BufferHandle, _timestamp: i64, _duration: i64) {}

    fn push_buffer(&self, sink: SinkHandle, buffer: BufferHandle) -> bool {
        debug!(?sink, ?buffer, "stub: buffer pushed");
        true
    }

    fn release_buffer(&self, buffer: BufferHandle) {
        debug!(?buffer, "stub: buffer released");
    }

    fn attach_protection_meta(&self, buffer: BufferHandle, meta: &ProtectionMeta) -> bool {
        debug!(
            ?buffer,
            key_session_id = meta.key_session_id,
            subsample_count = meta.subsample_count,
            "stub: protection metadata attached"
        );
        true
    }

    fn sink_caps(&self, sink: SinkHandle) -> CapsHandle {
        let handle = CapsHandle(self.mint());
        debug!(?sink, ?handle, "stub: caps fetched");
        handle
    }

    fn copy_caps(&self, caps: CapsHandle) -> CapsHandle {
        let handle = CapsHandle(self.mint());
        debug!(source = ?caps, copy = ?handle, "stub: caps copied");
        handle
    }

    fn set_caps_field(&self, caps: CapsHandle, field: CapsField, value: i32) {
        debug!(?caps, field = field.name(), value, "stub: caps field set");
    }

    fn apply_caps(&self, sink: SinkHandle, caps: CapsHandle) {
        debug!(?sink, ?caps, "stub: caps applied");
    }

    fn release_caps(&self, caps: CapsHandle) {
        debug!(?caps, "stub: caps released");
    }

    fn caps_media_kind(&self, _caps: CapsHandle) -> Option<MediaSourceType> {
        None
    }
}
