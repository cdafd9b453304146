//! Native pipeline backend seam
//!
//! The engine never calls the multimedia framework directly; everything goes
//! through [`PipelineBackend`]. Handles are opaque tokens minted by the
//! backend — the engine only stores and passes them back. This keeps the
//! worker-thread logic testable against a recording fake and keeps the
//! framework-specific element wiring out of this crate.

mod stub;

pub use stub::StubBackend;

use mediabridge_common::MediaSourceType;

/// Opaque reference to the native pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineHandle(pub u64);

/// Opaque reference to a stream ingest point (per-source data entry element)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinkHandle(pub u64);

/// Opaque reference to a framework-native sample buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u64);

/// Opaque reference to a format descriptor (caps)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapsHandle(pub u64);

/// Opaque reference to an arbitrary pipeline element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub u64);

/// Target states for the native pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Null,
    Ready,
    Paused,
    Playing,
}

/// Outcome of a native state-change request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChangeResult {
    Success,
    Async,
    Failure,
}

/// Format descriptor fields the engine negotiates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapsField {
    Rate,
    Channels,
    Width,
    Height,
}

impl CapsField {
    pub fn name(&self) -> &'static str {
        match self {
            CapsField::Rate => "rate",
            CapsField::Channels => "channels",
            CapsField::Width => "width",
            CapsField::Height => "height",
        }
    }
}

/// Protection metadata handed to the backend for an encrypted buffer
///
/// The key id, initialization vector and subsample map have already been
/// materialized as framework buffers; the backend takes ownership of all
/// three when the attach succeeds. On failure the caller releases them.
#[derive(Debug, Clone, Copy)]
pub struct ProtectionMeta {
    pub key_session_id: i32,
    pub subsample_count: u32,
    pub init_with_last_15: u32,
    pub key_id: BufferHandle,
    pub init_vector: BufferHandle,
    pub subsamples: BufferHandle,
}

/// The narrow surface of the native multimedia framework the engine consumes.
///
/// All operations are fast, synchronous and local; none of them may block.
/// Implementations must be callable from the worker thread and, for position
/// queries, from timer-fired tasks executing on the worker thread.
pub trait PipelineBackend: Send + Sync {
    /// Build the playback pipeline. `None` on failure.
    fn create_pipeline(&self) -> Option<PipelineHandle>;

    fn release_pipeline(&self, pipeline: PipelineHandle);

    fn set_pipeline_state(&self, pipeline: PipelineHandle, state: PipelineState)
        -> StateChangeResult;

    /// Current playback position in nanoseconds, if the query succeeds.
    fn query_position(&self, pipeline: PipelineHandle) -> Option<i64>;

    fn alloc_buffer(&self, len: usize) -> BufferHandle;

    fn fill_buffer(&self, buffer: BufferHandle, data: &[u8]);

    fn set_buffer_timing(&self, buffer: BufferHandle, timestamp: i64, duration: i64);

    /// Push a buffer into an ingest point. Ownership of the buffer transfers
    /// to the pipeline whether or not the push is accepted.
    fn push_buffer(&self, sink: SinkHandle, buffer: BufferHandle) -> bool;

    fn release_buffer(&self, buffer: BufferHandle);

    /// Attach protection metadata to a buffer. On failure the sub-buffers
    /// referenced by `meta` remain owned by the caller.
    fn attach_protection_meta(&self, buffer: BufferHandle, meta: &ProtectionMeta) -> bool;

    /// Fetch the ingest point's current format descriptor. The returned
    /// handle must be released with [`PipelineBackend::release_caps`].
    fn sink_caps(&self, sink: SinkHandle) -> CapsHandle;

    /// Make a working copy of a descriptor. Must also be released.
    fn copy_caps(&self, caps: CapsHandle) -> CapsHandle;

    fn set_caps_field(&self, caps: CapsHandle, field: CapsField, value: i32);

    fn apply_caps(&self, sink: SinkHandle, caps: CapsHandle);

    fn release_caps(&self, caps: CapsHandle);

    /// Classify a descriptor by the stream kind it describes, if any.
    fn caps_media_kind(&self, caps: CapsHandle) -> Option<MediaSourceType>;
}
