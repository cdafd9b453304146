//! Event types for the MediaBridge event system

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stream source kinds handled by a playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaSourceType {
    Audio,
    Video,
}

impl MediaSourceType {
    /// All source kinds, in a fixed iteration order.
    pub const ALL: [MediaSourceType; 2] = [MediaSourceType::Audio, MediaSourceType::Video];
}

impl std::fmt::Display for MediaSourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaSourceType::Audio => write!(f, "audio"),
            MediaSourceType::Video => write!(f, "video"),
        }
    }
}

/// Network (buffering) state reported to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkState {
    Empty,
    Buffering,
    Buffered,
    Stalled,
    NetworkError,
}

/// Playback state reported to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
    Stopped,
    EndOfStream,
    Failure,
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackState::Idle => write!(f, "idle"),
            PlaybackState::Playing => write!(f, "playing"),
            PlaybackState::Paused => write!(f, "paused"),
            PlaybackState::Stopped => write!(f, "stopped"),
            PlaybackState::EndOfStream => write!(f, "end-of-stream"),
            PlaybackState::Failure => write!(f, "failure"),
        }
    }
}

/// Session event types
///
/// Everything a playback session reports outward travels as one of these.
/// The IPC front-end converts them to wire messages; the bundled binary
/// serializes them as JSON lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// Network (buffering) state changed
    NetworkStateChanged {
        session_id: Uuid,
        state: NetworkState,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Playback state changed
    PlaybackStateChanged {
        session_id: Uuid,
        state: PlaybackState,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Playback position update (sent on the position reporting interval)
    PositionChanged {
        session_id: Uuid,
        position_ns: i64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The pipeline is ready for more data on a source
    NeedMediaData {
        session_id: Uuid,
        source: MediaSourceType,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}
