//! Queue client-supplied sample segments and try to attach them.

use crate::player::context::{PlayerContext, QueuedBuffer};
use crate::player::core::PlayerCore;
use crate::player::task::PlayerTask;
use mediabridge_common::{MediaSegment, MediaSourceType};
use tracing::trace;

pub(crate) struct AttachSamples {
    segments: Vec<MediaSegment>,
}

impl AttachSamples {
    pub(crate) fn new(segments: Vec<MediaSegment>) -> Self {
        Self { segments }
    }
}

impl PlayerTask for AttachSamples {
    fn name(&self) -> &'static str {
        "attach-samples"
    }

    fn execute(&self, ctx: &mut PlayerContext, player: &PlayerCore) {
        let mut touched = [false; MediaSourceType::ALL.len()];
        for segment in &self.segments {
            trace!(source = %segment.source, timestamp = segment.timestamp, "queueing sample");
            let handle = player.create_buffer(segment);
            ctx.stream_mut(segment.source).pending.push_back(QueuedBuffer {
                handle,
                timestamp: segment.timestamp,
                duration: segment.duration,
            });
            touched[segment.source as usize] = true;
        }

        for (i, source) in MediaSourceType::ALL.into_iter().enumerate() {
            if touched[i] {
                player.attach_data(ctx, source);
            }
        }
    }
}
