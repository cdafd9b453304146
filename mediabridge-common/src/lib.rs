//! # MediaBridge Common Library
//!
//! Shared types used by the pipeline server and its front-ends:
//! - Stream source and playback/network state enums
//! - Session event types (SessionEvent enum)
//! - Media segment descriptions exchanged with clients

pub mod events;
pub mod media;

pub use events::{MediaSourceType, NetworkState, PlaybackState, SessionEvent};
pub use media::{MediaSegment, ProtectionData, SubSample};
