//! Session fixture for integration tests
//!
//! Runs a real worker thread and real timers against the stub backend, with
//! events drained from the forwarder channel. Timer intervals are shortened
//! so the tests stay fast.

use mediabridge_common::SessionEvent;
use mediabridge_server::{
    Config, EventForwarder, SessionPlayer, StubBackend, ThreadTimerFactory,
};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

pub struct TestSession {
    pub session_id: Uuid,
    pub player: SessionPlayer,
    pub events: Receiver<SessionEvent>,
}

impl TestSession {
    pub fn start() -> Self {
        let config = Config {
            position_report_interval_ms: 20,
            source_setup_timeout_ms: 20,
            audio_stall_threshold_ms: 50,
            ..Config::default()
        };
        Self::start_with(config)
    }

    pub fn start_with(config: Config) -> Self {
        let session_id = Uuid::new_v4();
        let (tx, events) = std::sync::mpsc::channel();
        let player = SessionPlayer::new(
            session_id,
            Arc::new(StubBackend::new()),
            Arc::new(EventForwarder::new(session_id, tx)),
            Arc::new(ThreadTimerFactory),
            &config,
        )
        .expect("session creation");
        Self {
            session_id,
            player,
            events,
        }
    }
}

/// Wait up to `timeout` for an event matching `predicate`, discarding
/// non-matching events along the way.
pub fn recv_matching<F>(
    events: &Receiver<SessionEvent>,
    timeout: Duration,
    mut predicate: F,
) -> Option<SessionEvent>
where
    F: FnMut(&SessionEvent) -> bool,
{
    let deadline = Instant::now() + timeout;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match events.recv_timeout(remaining) {
            Ok(event) if predicate(&event) => return Some(event),
            Ok(_) => continue,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => return None,
        }
    }
}
