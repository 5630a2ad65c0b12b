use std::time::Duration;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{BabaError, BabaResult};
use crate::render::frame::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Display time of every frame.
    pub frame_delay: Duration,
}

/// Sink contract for consuming processed frames in animation order.
///
/// Ordering contract: `push_frame` is called with strictly increasing [`FrameIndex`] values.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> BabaResult<()>;
    /// Push one frame in strictly increasing order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BabaResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> BabaResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Whether `end` has been called since the last `begin`.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> BabaResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BabaResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> BabaResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Stream `frames` into `sink` in order, framing the calls with `begin`/`end`.
///
/// All frames must share the first frame's dimensions.
pub fn write_frames(
    sink: &mut dyn FrameSink,
    frames: &[FrameRGBA],
    frame_delay: Duration,
) -> BabaResult<()> {
    let Some(first) = frames.first() else {
        return Err(BabaError::validation(
            "cannot encode an animation with no frames",
        ));
    };

    sink.begin(SinkConfig {
        width: first.width,
        height: first.height,
        frame_delay,
    })?;
    for (i, frame) in frames.iter().enumerate() {
        sink.push_frame(FrameIndex(i as u64), frame)?;
    }
    sink.end()
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
