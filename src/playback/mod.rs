//! Preview playback: a cancellable fixed-interval ring over the current frame set.

pub(crate) mod clock;
pub(crate) mod driver;
