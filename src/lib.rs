//! babagif renders a short word as a jittery pixel-art icon and exports it as a looping GIF.
//!
//! # Pipeline overview
//!
//! 1. **Rasterize**: `RenderConfig + JitterSource -> FrameRGBA`. Characters are placed on a one-
//!    or two-row grid. Each glyph gets its own small random rotation and shear, and white glyphs
//!    are drawn on black.
//! 2. **Pixelate**: `FrameRGBA -> FrameRGBA`. Every 4x4 block is thresholded on its top-left
//!    sample and painted in one of exactly two colors.
//! 3. **Encode**: three pixelated frames go through a [`FrameSink`] and come out as a looping GIF
//!    ([`AnimatedImageArtifact`]).
//! 4. **Preview**: [`PlaybackDriver`] cycles the frames every 200 ms behind a cancellable timer.
//!
//! [`IconSession`] owns one full cycle of this pipeline and rebuilds it on every config change or
//! explicit regeneration.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Explicit randomness**: jitter always comes from an injected [`JitterSource`], never from
//!   ambient global state, so seeded frames are reproducible.
//! - **Opaque RGBA8** end-to-end: every frame is fully opaque.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod foundation;
mod playback;
mod quantize;
mod render;
mod session;

/// Encoding sinks and the GIF artifact.
pub mod encode;

pub use crate::config::color::Rgb8;
pub use crate::config::render_config::{
    CANVAS_EXTENT_RANGE, GLYPH_SIZE_RANGE, PADDING_RANGE, RenderConfig,
};
pub use crate::encode::gif::{AnimatedImageArtifact, GifSink, encode_gif, ensure_parent_dir};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig, write_frames};
pub use crate::foundation::core::{FRAME_COUNT, FRAME_DELAY, FrameIndex};
pub use crate::foundation::error::{BabaError, BabaResult};
pub use crate::foundation::math::Rng64;
pub use crate::playback::clock::{Clock, ManualClock, SystemClock};
pub use crate::playback::driver::{PlaybackDriver, TimerHandle};
pub use crate::quantize::pixelate::{BLOCK_SIZE, LUMA_THRESHOLD, quantize_frame};
pub use crate::render::fonts::RasterizerOpts;
pub use crate::render::frame::FrameRGBA;
pub use crate::render::jitter::{JITTER_AMPLITUDE, Jitter, JitterSource, NoJitter, SeededJitter};
pub use crate::render::layout::{GridCell, GridLayout, layout_grid};
pub use crate::render::rasterizer::Rasterizer;
pub use crate::session::icon_session::{IconSession, generate_frame_set};
