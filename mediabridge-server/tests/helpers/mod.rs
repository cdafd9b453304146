//! Test helper module for MediaBridge server integration tests
//!
//! Provides a ready-wired playback session against the stub backend plus
//! event-channel polling utilities.

pub mod session;

pub use session::{recv_matching, TestSession};
