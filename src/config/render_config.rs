use std::ops::RangeInclusive;
use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::config::color::Rgb8;
use crate::foundation::error::{BabaError, BabaResult};

/// Accepted range for [`RenderConfig::canvas_extent`].
pub const CANVAS_EXTENT_RANGE: RangeInclusive<u32> = 24..=256;
/// Accepted range for [`RenderConfig::glyph_size`].
pub const GLYPH_SIZE_RANGE: RangeInclusive<u32> = 4..=100;
/// Accepted range for [`RenderConfig::padding`].
pub const PADDING_RANGE: RangeInclusive<u32> = 0..=30;

/// Immutable snapshot of every parameter that affects the rendered icon.
///
/// Any change to a field means a full regeneration of the frame set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Text to lay out, one grid cell per character.
    pub text: String,
    /// Font family name; unknown families fall back to a system default.
    pub font_family: String,
    /// Color for blocks below the luminance threshold.
    pub background: Rgb8,
    /// Color for blocks above the luminance threshold.
    pub foreground: Rgb8,
    /// Side of the square drawing area, padding excluded.
    pub canvas_extent: u32,
    /// Glyph size in pixels.
    pub glyph_size: u32,
    /// Margin added on every side of the drawing area.
    pub padding: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            text: "BABA".to_owned(),
            font_family: "Arial".to_owned(),
            background: Rgb8::BLACK,
            foreground: Rgb8::new(0xBA, 0x22, 0x60),
            canvas_extent: 100,
            glyph_size: 50,
            padding: 6,
        }
    }
}

impl RenderConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_path(path: &Path) -> BabaResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_slice(&bytes)
    }

    /// Parse a config from JSON bytes and validate it.
    pub fn from_json_slice(bytes: &[u8]) -> BabaResult<Self> {
        let cfg: Self =
            serde_json::from_slice(bytes).map_err(|e| BabaError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the numeric fields against the ranges the controls allow.
    pub fn validate(&self) -> BabaResult<()> {
        check_range("canvas_extent", self.canvas_extent, &CANVAS_EXTENT_RANGE)?;
        check_range("glyph_size", self.glyph_size, &GLYPH_SIZE_RANGE)?;
        check_range("padding", self.padding, &PADDING_RANGE)?;
        Ok(())
    }

    /// Side length of every frame: `canvas_extent + 2 * padding`.
    pub fn frame_extent(&self) -> u32 {
        self.canvas_extent + 2 * self.padding
    }

    /// Download file name for this config's artifact.
    ///
    /// Characters that are not allowed in file names are replaced with `_`.
    pub fn artifact_file_name(&self) -> String {
        let stem: String = self
            .text
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        let stem = stem.trim();
        if stem.is_empty() || stem == "." || stem == ".." {
            "icon.gif".to_owned()
        } else {
            format!("{stem}.gif")
        }
    }
}

fn check_range(name: &str, value: u32, range: &RangeInclusive<u32>) -> BabaResult<()> {
    if range.contains(&value) {
        return Ok(());
    }
    Err(BabaError::validation(format!(
        "{name} must be in {}..={}, got {value}",
        range.start(),
        range.end()
    )))
}

#[cfg(test)]
#[path = "../../tests/unit/config/render_config.rs"]
mod tests;
