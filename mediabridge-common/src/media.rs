//! Media segment types exchanged between clients and the pipeline server

use crate::events::MediaSourceType;
use serde::{Deserialize, Serialize};

/// One clear/encrypted byte-range pair of an encrypted sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubSample {
    pub clear_bytes: u16,
    pub encrypted_bytes: u32,
}

/// Protection parameters attached to an encrypted segment
///
/// The binary layout of the metadata the native framework consumes is the
/// backend's concern; this only carries the values the client supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectionData {
    pub key_session_id: i32,
    pub init_with_last_15: u32,
    pub key_id: Vec<u8>,
    pub init_vector: Vec<u8>,
    pub subsamples: Vec<SubSample>,
}

/// A single sample delivered by a client for attachment to the pipeline
///
/// Timestamps and durations are in nanoseconds, matching the native
/// framework's clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaSegment {
    pub source: MediaSourceType,
    pub timestamp: i64,
    pub duration: i64,
    pub payload: Vec<u8>,
    pub protection: Option<ProtectionData>,
}

impl MediaSegment {
    pub fn new(source: MediaSourceType, timestamp: i64, duration: i64, payload: Vec<u8>) -> Self {
        Self {
            source,
            timestamp,
            duration,
            payload,
            protection: None,
        }
    }

    pub fn with_protection(mut self, protection: ProtectionData) -> Self {
        self.protection = Some(protection);
        self
    }

    pub fn is_encrypted(&self) -> bool {
        self.protection.is_some()
    }
}
