//! Client notifier surface
//!
//! Tasks report state transitions outward exclusively through
//! [`PlayerClient`]. The IPC front-end implements this trait against the wire
//! protocol; [`EventForwarder`] is the in-process implementation used by the
//! bundled binary and by tests.

use mediabridge_common::{MediaSourceType, NetworkState, PlaybackState, SessionEvent};
use std::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

/// Callback surface used by tasks to report session state outward.
///
/// Implementations must be cheap and non-blocking; they are invoked from the
/// worker thread.
pub trait PlayerClient: Send + Sync {
    /// Ask the client for more data on a source. Returns false when the
    /// client could not accept the request.
    fn notify_need_media_data(&self, source: MediaSourceType) -> bool;

    fn notify_network_state(&self, state: NetworkState);

    fn notify_playback_state(&self, state: PlaybackState);

    /// Playback position in nanoseconds.
    fn notify_position(&self, position_ns: i64);
}

/// Forwards client notifications as [`SessionEvent`]s over a channel
pub struct EventForwarder {
    session_id: Uuid,
    tx: mpsc::Sender<SessionEvent>,
}

impl EventForwarder {
    pub fn new(session_id: Uuid, tx: mpsc::Sender<SessionEvent>) -> Self {
        Self { session_id, tx }
    }

    fn send(&self, event: SessionEvent) {
        if self.tx.send(event).is_err() {
            debug!("event receiver dropped, notification discarded");
        }
    }
}

impl PlayerClient for EventForwarder {
    fn notify_need_media_data(&self, source: MediaSourceType) -> bool {
        self.send(SessionEvent::NeedMediaData {
            session_id: self.session_id,
            source,
            timestamp: chrono::Utc::now(),
        });
        true
    }

    fn notify_network_state(&self, state: NetworkState) {
        self.send(SessionEvent::NetworkStateChanged {
            session_id: self.session_id,
            state,
            timestamp: chrono::Utc::now(),
        });
    }

    fn notify_playback_state(&self, state: PlaybackState) {
        self.send(SessionEvent::PlaybackStateChanged {
            session_id: self.session_id,
            state,
            timestamp: chrono::Utc::now(),
        });
    }

    fn notify_position(&self, position_ns: i64) {
        self.send(SessionEvent::PositionChanged {
            session_id: self.session_id,
            position_ns,
            timestamp: chrono::Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarder_emits_events() {
        let (tx, rx) = mpsc::channel();
        let client = EventForwarder::new(Uuid::new_v4(), tx);

        assert!(client.notify_need_media_data(MediaSourceType::Audio));
        client.notify_playback_state(PlaybackState::Playing);

        match rx.try_recv().unwrap() {
            SessionEvent::NeedMediaData { source, .. } => {
                assert_eq!(source, MediaSourceType::Audio)
            }
            other => panic!("unexpected event: {:?}", other),
        }
        match rx.try_recv().unwrap() {
            SessionEvent::PlaybackStateChanged { state, .. } => {
                assert_eq!(state, PlaybackState::Playing)
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_forwarder_survives_dropped_receiver() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let client = EventForwarder::new(Uuid::new_v4(), tx);
        client.notify_network_state(NetworkState::Stalled);
    }
}
