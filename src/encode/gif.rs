use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::encode::sink::{FrameSink, SinkConfig, write_frames};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{BabaError, BabaResult};
use crate::render::frame::FrameRGBA;

/// NeuQuant sampling speed handed to the GIF codec (1 = best, 30 = fastest).
///
/// Two-color frames take the codec's exact-palette path, so this only matters for foreign input.
const GIF_QUANTIZE_SPEED: i32 = 10;

/// Encoded looping GIF plus the file name it should be offered under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimatedImageArtifact {
    bytes: Arc<[u8]>,
    file_name: String,
}

impl AnimatedImageArtifact {
    /// Encoded GIF bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Suggested download file name, e.g. `BABA.gif`.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Size of the encoded stream in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the encoded stream is empty (never true for a finalized sink).
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the artifact into `dir` under [`Self::file_name`] and return the written path.
    pub fn save_to(&self, dir: &Path) -> BabaResult<PathBuf> {
        let path = dir.join(&self.file_name);
        self.write_to(&path)?;
        Ok(path)
    }

    /// Write the artifact to an explicit path, creating parent directories.
    pub fn write_to(&self, path: &Path) -> BabaResult<()> {
        ensure_parent_dir(path)?;
        std::fs::write(path, &self.bytes)
            .with_context(|| format!("write gif '{}'", path.display()))?;
        Ok(())
    }
}

/// Sink that collects frames and finalizes them into a looping GIF.
///
/// The codec builds a palette of at most 256 entries per frame and maps every pixel to it.
#[derive(Default)]
pub struct GifSink {
    cfg: Option<SinkConfig>,
    frames: Vec<Frame>,
    last_idx: Option<FrameIndex>,
    bytes: Option<Vec<u8>>,
}

impl GifSink {
    /// Create an idle sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finalized GIF bytes, available after `end`.
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    /// Consume the sink and wrap its finalized bytes as a downloadable artifact.
    pub fn into_artifact(self, file_name: impl Into<String>) -> BabaResult<AnimatedImageArtifact> {
        let bytes = self
            .bytes
            .ok_or_else(|| BabaError::validation("gif sink has not been finalized"))?;
        Ok(AnimatedImageArtifact {
            bytes: bytes.into(),
            file_name: file_name.into(),
        })
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> BabaResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(BabaError::validation(
                "gif sink width/height must be non-zero",
            ));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(BabaError::validation(format!(
                "gif frames are limited to 65535x65535, got {}x{}",
                cfg.width, cfg.height
            )));
        }

        self.frames.clear();
        self.last_idx = None;
        self.bytes = None;
        self.cfg = Some(cfg);
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BabaResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| BabaError::validation("gif sink not started"))?;
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(BabaError::validation(
                "gif sink received out-of-order frame index",
            ));
        }
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(BabaError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        let image = RgbaImage::from_raw(frame.width, frame.height, frame.data.clone())
            .ok_or_else(|| {
                BabaError::validation("frame.data size mismatch with width*height*4")
            })?;
        let delay = Delay::from_saturating_duration(cfg.frame_delay);
        self.frames.push(Frame::from_parts(image, 0, 0, delay));
        self.last_idx = Some(idx);
        Ok(())
    }

    fn end(&mut self) -> BabaResult<()> {
        if self.cfg.take().is_none() {
            return Err(BabaError::validation("gif sink not started"));
        }
        if self.frames.is_empty() {
            return Err(BabaError::validation("gif sink received no frames"));
        }

        let frame_count = self.frames.len();
        let mut bytes = Vec::new();
        {
            let mut encoder = GifEncoder::new_with_speed(&mut bytes, GIF_QUANTIZE_SPEED);
            encoder
                .set_repeat(Repeat::Infinite)
                .map_err(|e| BabaError::encode(format!("failed to enable looping: {e}")))?;
            encoder
                .encode_frames(self.frames.drain(..))
                .map_err(|e| BabaError::encode(format!("failed to encode gif frames: {e}")))?;
            // Dropping the encoder writes the GIF trailer.
        }

        tracing::debug!(frames = frame_count, bytes = bytes.len(), "gif finalized");
        self.bytes = Some(bytes);
        Ok(())
    }
}

/// Encode `frames` as a looping GIF with a constant per-frame delay.
pub fn encode_gif(
    frames: &[FrameRGBA],
    frame_delay: Duration,
    file_name: impl Into<String>,
) -> BabaResult<AnimatedImageArtifact> {
    let mut sink = GifSink::new();
    write_frames(&mut sink, frames, frame_delay)?;
    sink.into_artifact(file_name)
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> BabaResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
