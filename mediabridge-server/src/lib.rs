//! MediaBridge control server
//!
//! Session-oriented playback engine for a native media pipeline. Clients
//! feed sample segments and backpressure signals in; the engine serializes
//! every pipeline mutation through a per-session task queue and reports
//! state transitions back through a client notifier.

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod player;

pub use backend::{PipelineBackend, StubBackend};
pub use client::{EventForwarder, PlayerClient};
pub use config::Config;
pub use error::{Error, Result};
pub use player::timer::{ThreadTimerFactory, TimerFactory};
pub use player::SessionPlayer;
