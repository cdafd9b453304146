//! Shared test doubles for the player engine
//!
//! A recording backend and client, a manually-fired timer factory, and a
//! ready-wired player core. Unit tests drive the core synchronously against
//! these and assert on the recorded call sequences.

use crate::backend::{
    BufferHandle, CapsField, CapsHandle, PipelineBackend, PipelineHandle, PipelineState,
    ProtectionMeta, SinkHandle, StateChangeResult,
};
use crate::client::PlayerClient;
use crate::config::Config;
use crate::player::context::{PlayerContext, QueuedBuffer};
use crate::player::core::PlayerCore;
use crate::player::task::PlayerTask;
use crate::player::timer::{Timer, TimerFactory, TimerKind};
use crate::player::worker::TaskQueue;
use mediabridge_common::{MediaSourceType, NetworkState, PlaybackState};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BackendCall {
    CreatePipeline,
    ReleasePipeline(PipelineHandle),
    SetPipelineState(PipelineHandle, PipelineState),
    QueryPosition(PipelineHandle),
    AllocBuffer(usize),
    FillBuffer(BufferHandle, usize),
    SetBufferTiming(BufferHandle, i64, i64),
    PushBuffer(SinkHandle, BufferHandle),
    ReleaseBuffer(BufferHandle),
    AttachProtectionMeta(BufferHandle),
    SinkCaps(SinkHandle),
    CopyCaps(CapsHandle),
    SetCapsField(CapsHandle, CapsField, i32),
    ApplyCaps(SinkHandle, CapsHandle),
    ReleaseCaps(CapsHandle),
    CapsMediaKind(CapsHandle),
}

/// Records every backend call in order; failure modes are switchable.
pub(crate) struct MockBackend {
    calls: Mutex<Vec<BackendCall>>,
    next_handle: AtomicU64,
    fail_state_changes: AtomicBool,
    fail_protection_meta: AtomicBool,
    reject_pushes: AtomicBool,
    position: Mutex<Option<i64>>,
    media_kind: Mutex<Option<MediaSourceType>>,
}

impl MockBackend {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            // High enough to stay clear of handles tests pick by hand.
            next_handle: AtomicU64::new(1000),
            fail_state_changes: AtomicBool::new(false),
            fail_protection_meta: AtomicBool::new(false),
            reject_pushes: AtomicBool::new(false),
            position: Mutex::new(None),
            media_kind: Mutex::new(None),
        })
    }

    pub(crate) fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub(crate) fn fail_state_changes(&self) {
        self.fail_state_changes.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_protection_meta(&self) {
        self.fail_protection_meta.store(true, Ordering::SeqCst);
    }

    pub(crate) fn reject_pushes(&self) {
        self.reject_pushes.store(true, Ordering::SeqCst);
    }

    pub(crate) fn set_position(&self, position_ns: Option<i64>) {
        *self.position.lock().unwrap() = position_ns;
    }

    pub(crate) fn set_media_kind(&self, kind: Option<MediaSourceType>) {
        *self.media_kind.lock().unwrap() = kind;
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn mint(&self) -> u64 {
        self.next_handle.fetch_add(1, Ordering::SeqCst)
    }
}

impl PipelineBackend for MockBackend {
    fn create_pipeline(&self) -> Option<PipelineHandle> {
        self.record(BackendCall::CreatePipeline);
        Some(PipelineHandle(self.mint()))
    }

    fn release_pipeline(&self, pipeline: PipelineHandle) {
        self.record(BackendCall::ReleasePipeline(pipeline));
    }

    fn set_pipeline_state(
        &self,
        pipeline: PipelineHandle,
        state: PipelineState,
    ) -> StateChangeResult {
        self.record(BackendCall::SetPipelineState(pipeline, state));
        if self.fail_state_changes.load(Ordering::SeqCst) {
            StateChangeResult::Failure
        } else {
            StateChangeResult::Success
        }
    }

    fn query_position(&self, pipeline: PipelineHandle) -> Option<i64> {
        self.record(BackendCall::QueryPosition(pipeline));
        *self.position.lock().unwrap()
    }

    fn alloc_buffer(&self, len: usize) -> BufferHandle {
        self.record(BackendCall::AllocBuffer(len));
        BufferHandle(self.mint())
    }

    fn fill_buffer(&self, buffer: BufferHandle, data: &[u8]) {
        self.record(BackendCall::FillBuffer(buffer, data.len()));
    }

    fn set_buffer_timing(&self, buffer: BufferHandle, timestamp: i64, duration: i64) {
        self.record(BackendCall::SetBufferTiming(buffer, timestamp, duration));
    }

    fn push_buffer(&self, sink: SinkHandle, buffer: BufferHandle) -> bool {
        self.record(BackendCall::PushBuffer(sink, buffer));
        !self.reject_pushes.load(Ordering::SeqCst)
    }

    fn release_buffer(&self, buffer: BufferHandle) {
        self.record(BackendCall::ReleaseBuffer(buffer));
    }

    fn attach_protection_meta(&self, buffer: BufferHandle, _meta: &ProtectionMeta) -> bool {
        self.record(BackendCall::AttachProtectionMeta(buffer));
        !self.fail_protection_meta.load(Ordering::SeqCst)
    }

    fn sink_caps(&self, sink: SinkHandle) -> CapsHandle {
        self.record(BackendCall::SinkCaps(sink));
        CapsHandle(self.mint())
    }

    fn copy_caps(&self, caps: CapsHandle) -> CapsHandle {
        self.record(BackendCall::CopyCaps(caps));
        CapsHandle(self.mint())
    }

    fn set_caps_field(&self, caps: CapsHandle, field: CapsField, value: i32) {
        self.record(BackendCall::SetCapsField(caps, field, value));
    }

    fn apply_caps(&self, sink: SinkHandle, caps: CapsHandle) {
        self.record(BackendCall::ApplyCaps(sink, caps));
    }

    fn release_caps(&self, caps: CapsHandle) {
        self.record(BackendCall::ReleaseCaps(caps));
    }

    fn caps_media_kind(&self, caps: CapsHandle) -> Option<MediaSourceType> {
        self.record(BackendCall::CapsMediaKind(caps));
        *self.media_kind.lock().unwrap()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClientCall {
    NeedMediaData(MediaSourceType),
    NetworkState(NetworkState),
    PlaybackState(PlaybackState),
    Position(i64),
}

/// Records every outward notification in order.
pub(crate) struct MockClient {
    calls: Mutex<Vec<ClientCall>>,
    reject_need_data: AtomicBool,
}

impl MockClient {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            reject_need_data: AtomicBool::new(false),
        })
    }

    pub(crate) fn calls(&self) -> Vec<ClientCall> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn reject_need_data(&self) {
        self.reject_need_data.store(true, Ordering::SeqCst);
    }
}

impl PlayerClient for MockClient {
    fn notify_need_media_data(&self, source: MediaSourceType) -> bool {
        self.calls
            .lock()
            .unwrap()
            .push(ClientCall::NeedMediaData(source));
        !self.reject_need_data.load(Ordering::SeqCst)
    }

    fn notify_network_state(&self, state: NetworkState) {
        self.calls
            .lock()
            .unwrap()
            .push(ClientCall::NetworkState(state));
    }

    fn notify_playback_state(&self, state: PlaybackState) {
        self.calls
            .lock()
            .unwrap()
            .push(ClientCall::PlaybackState(state));
    }

    fn notify_position(&self, position_ns: i64) {
        self.calls
            .lock()
            .unwrap()
            .push(ClientCall::Position(position_ns));
    }
}

struct ManualTimerState {
    callback: Mutex<Box<dyn Fn() + Send>>,
    kind: TimerKind,
    active: AtomicBool,
}

/// Timer handle whose firing is driven by the test via the factory.
struct ManualTimer {
    state: Arc<ManualTimerState>,
    cancelled: Arc<AtomicUsize>,
}

impl Timer for ManualTimer {
    fn is_active(&self) -> bool {
        self.state.active.load(Ordering::SeqCst)
    }

    fn cancel(&self) {
        self.state.active.store(false, Ordering::SeqCst);
        self.cancelled.fetch_add(1, Ordering::SeqCst);
    }
}

/// Hands out [`ManualTimer`]s and keeps them addressable by creation index.
pub(crate) struct ManualTimerFactory {
    timers: Mutex<Vec<Arc<ManualTimerState>>>,
    cancelled: Arc<AtomicUsize>,
}

impl ManualTimerFactory {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            timers: Mutex::new(Vec::new()),
            cancelled: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub(crate) fn created_count(&self) -> usize {
        self.timers.lock().unwrap().len()
    }

    pub(crate) fn cancelled_count(&self) -> usize {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Mark every handed-out timer expired without counting a cancel.
    pub(crate) fn deactivate_all(&self) {
        for state in self.timers.lock().unwrap().iter() {
            state.active.store(false, Ordering::SeqCst);
        }
    }

    /// Run the callback of the `index`-th created timer. A one-shot timer
    /// goes inactive, as the real thing would.
    pub(crate) fn fire(&self, index: usize) {
        let state = Arc::clone(&self.timers.lock().unwrap()[index]);
        if !state.active.load(Ordering::SeqCst) {
            return;
        }
        (state.callback.lock().unwrap())();
        if state.kind == TimerKind::OneShot {
            state.active.store(false, Ordering::SeqCst);
        }
    }
}

impl TimerFactory for ManualTimerFactory {
    fn create_timer(
        &self,
        _timeout: Duration,
        callback: Box<dyn Fn() + Send>,
        kind: TimerKind,
    ) -> Option<Box<dyn Timer>> {
        let state = Arc::new(ManualTimerState {
            callback: Mutex::new(callback),
            kind,
            active: AtomicBool::new(true),
        });
        self.timers.lock().unwrap().push(Arc::clone(&state));
        Some(Box::new(ManualTimer {
            state,
            cancelled: Arc::clone(&self.cancelled),
        }))
    }
}

pub(crate) fn queued(handle: u64, timestamp: i64, duration: i64) -> QueuedBuffer {
    QueuedBuffer {
        handle: BufferHandle(handle),
        timestamp,
        duration,
    }
}

/// A player core wired to recording doubles, with a context whose pipeline
/// already exists and no worker thread attached. Tests either drive the core
/// directly or hand the queue and context to a [`WorkerThread`].
pub(crate) fn test_player() -> (
    Arc<PlayerCore>,
    PlayerContext,
    Arc<MockBackend>,
    Arc<MockClient>,
    Arc<ManualTimerFactory>,
    Arc<TaskQueue>,
) {
    let backend = MockBackend::new();
    let client = MockClient::new();
    let timers = ManualTimerFactory::new();
    let queue = TaskQueue::new();
    let core = Arc::new(PlayerCore::new(
        Uuid::new_v4(),
        Arc::clone(&backend) as Arc<dyn PipelineBackend>,
        Arc::clone(&client) as Arc<dyn PlayerClient>,
        Arc::clone(&timers) as Arc<dyn TimerFactory>,
        Arc::clone(&queue),
        Config::default(),
    ));
    let ctx = PlayerContext::new(Some(PipelineHandle(1)));
    (core, ctx, backend, client, timers, queue)
}

/// Appends its id to a shared log; optionally submits a follow-up task from
/// inside `execute` to exercise nested submission.
pub(crate) struct RecordingTask {
    id: i32,
    log: Arc<Mutex<Vec<i32>>>,
    followup: Mutex<Option<Box<dyn PlayerTask>>>,
}

impl RecordingTask {
    pub(crate) fn log() -> Arc<Mutex<Vec<i32>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    pub(crate) fn new(id: i32, log: &Arc<Mutex<Vec<i32>>>) -> Self {
        Self {
            id,
            log: Arc::clone(log),
            followup: Mutex::new(None),
        }
    }

    pub(crate) fn with_followup(self, task: Box<dyn PlayerTask>) -> Self {
        *self.followup.lock().unwrap() = Some(task);
        self
    }
}

impl PlayerTask for RecordingTask {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn execute(&self, _ctx: &mut PlayerContext, player: &PlayerCore) {
        self.log.lock().unwrap().push(self.id);
        if let Some(task) = self.followup.lock().unwrap().take() {
            player.submit(task);
        }
    }
}

/// Blocks the worker for a fixed duration.
pub(crate) struct SleepTask {
    duration: Duration,
}

impl SleepTask {
    pub(crate) fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl PlayerTask for SleepTask {
    fn name(&self) -> &'static str {
        "sleep"
    }

    fn execute(&self, _ctx: &mut PlayerContext, _player: &PlayerCore) {
        std::thread::sleep(self.duration);
    }
}
