use std::collections::BTreeSet;

use crate::foundation::error::{BabaError, BabaResult};

/// A rendered frame as opaque RGBA8 pixels.
///
/// Every frame the pipeline produces is fully opaque, so straight and premultiplied alpha
/// coincide and no flag is carried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Allocate a frame filled with one color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let len = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(len * 4);
        for _ in 0..len {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap an existing buffer, checking its length against the dimensions.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> BabaResult<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if data.len() != expected {
            return Err(BabaError::validation(format!(
                "rgba8 buffer has {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// RGBA of the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Set of distinct RGBA values present in the frame.
    pub fn distinct_colors(&self) -> BTreeSet<[u8; 4]> {
        self.data
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
            .collect()
    }
}
