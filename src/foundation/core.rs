use std::time::Duration;

/// Number of frames in every animation.
pub const FRAME_COUNT: usize = 3;

/// Display time of each frame, for both preview playback and the encoded GIF.
pub const FRAME_DELAY: Duration = Duration::from_millis(200);

/// 0-based position of a frame within one animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameIndex(pub u64);
