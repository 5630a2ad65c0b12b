use std::sync::Arc;
use std::time::Duration;

use crate::config::render_config::RenderConfig;
use crate::encode::gif::{AnimatedImageArtifact, encode_gif};
use crate::foundation::core::{FRAME_COUNT, FRAME_DELAY};
use crate::foundation::error::BabaResult;
use crate::foundation::math::derive_seed;
use crate::playback::driver::PlaybackDriver;
use crate::quantize::pixelate::{BLOCK_SIZE, quantize_frame};
use crate::render::frame::FrameRGBA;
use crate::render::jitter::SeededJitter;
use crate::render::rasterizer::Rasterizer;

/// Render, pixelate and collect the [`FRAME_COUNT`] frames of one generation cycle.
///
/// Every frame draws its jitter from its own seed, derived from `master_seed` and `generation`.
pub fn generate_frame_set(
    rasterizer: &Rasterizer,
    config: &RenderConfig,
    master_seed: u64,
    generation: u64,
) -> BabaResult<Arc<[FrameRGBA]>> {
    let mut frames = Vec::with_capacity(FRAME_COUNT);
    for i in 0..FRAME_COUNT {
        let mut jitter = SeededJitter::new(derive_seed(master_seed, generation, i as u64));
        let raw = rasterizer.render_frame(config, &mut jitter)?;
        frames.push(quantize_frame(
            &raw,
            BLOCK_SIZE,
            config.background,
            config.foreground,
        )?);
    }
    Ok(frames.into())
}

/// Owns the pipeline state for one interactive user.
///
/// Config changes and explicit regenerations rebuild the frame set and the GIF artifact from
/// scratch. The results become visible together, and only when the whole cycle succeeded. A
/// failed cycle leaves the previous frames, artifact and playback untouched.
pub struct IconSession {
    config: RenderConfig,
    rasterizer: Rasterizer,
    master_seed: u64,
    next_generation: u64,
    generation: u64,
    frames: Arc<[FrameRGBA]>,
    artifact: AnimatedImageArtifact,
    driver: PlaybackDriver,
}

impl IconSession {
    /// Validate `config`, run the first generation cycle and start playback at `now`.
    pub fn new(
        config: RenderConfig,
        rasterizer: Rasterizer,
        master_seed: u64,
        now: Duration,
    ) -> BabaResult<Self> {
        config.validate()?;
        let (frames, artifact) = build_cycle(&rasterizer, &config, master_seed, 0)?;

        let mut driver = PlaybackDriver::new(Arc::clone(&frames), FRAME_DELAY);
        driver.arm(now);

        Ok(Self {
            config,
            rasterizer,
            master_seed,
            next_generation: 1,
            generation: 0,
            frames,
            artifact,
            driver,
        })
    }

    /// Config the current frames were rendered from.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Generation number of the visible frame set (0 for the first cycle).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The visible frame set.
    pub fn frames(&self) -> &Arc<[FrameRGBA]> {
        &self.frames
    }

    /// The GIF built from the visible frame set.
    pub fn artifact(&self) -> &AnimatedImageArtifact {
        &self.artifact
    }

    /// Rasterizer shared by every cycle.
    pub fn rasterizer(&self) -> &Rasterizer {
        &self.rasterizer
    }

    /// Preview playback driver.
    pub fn driver(&self) -> &PlaybackDriver {
        &self.driver
    }

    /// Mutable access to the preview playback driver.
    pub fn driver_mut(&mut self) -> &mut PlaybackDriver {
        &mut self.driver
    }

    /// Advance preview playback to `now`. Returns the number of ticks fired.
    pub fn poll(&mut self, now: Duration) -> usize {
        self.driver.poll(now)
    }

    /// Replace the config. Regenerates when it differs from the current one.
    pub fn set_config(&mut self, config: RenderConfig, now: Duration) -> BabaResult<()> {
        config.validate()?;
        if config == self.config {
            return Ok(());
        }
        self.run_cycle(config, now)
    }

    /// Rebuild everything with fresh jitter and the same config.
    pub fn regenerate(&mut self, now: Duration) -> BabaResult<()> {
        self.run_cycle(self.config.clone(), now)
    }

    #[tracing::instrument(skip_all, fields(text = %config.text, generation = self.next_generation))]
    fn run_cycle(&mut self, config: RenderConfig, now: Duration) -> BabaResult<()> {
        let generation = self.next_generation;
        self.next_generation += 1;

        let (frames, artifact) =
            match build_cycle(&self.rasterizer, &config, self.master_seed, generation) {
                Ok(cycle) => cycle,
                Err(e) => {
                    tracing::warn!(error = %e, "regeneration failed; keeping previous frames");
                    return Err(e);
                }
            };

        self.config = config;
        self.generation = generation;
        self.frames = Arc::clone(&frames);
        self.artifact = artifact;
        self.driver.rebind(frames, now);
        Ok(())
    }
}

fn build_cycle(
    rasterizer: &Rasterizer,
    config: &RenderConfig,
    master_seed: u64,
    generation: u64,
) -> BabaResult<(Arc<[FrameRGBA]>, AnimatedImageArtifact)> {
    let frames = generate_frame_set(rasterizer, config, master_seed, generation)?;
    let artifact = encode_gif(&frames, FRAME_DELAY, config.artifact_file_name())?;
    tracing::debug!(
        frames = frames.len(),
        gif_bytes = artifact.len(),
        "generation cycle complete"
    );
    Ok((frames, artifact))
}

#[cfg(test)]
#[path = "../../tests/unit/session/icon_session.rs"]
mod tests;
