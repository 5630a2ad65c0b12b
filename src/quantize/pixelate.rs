use crate::config::color::Rgb8;
use crate::foundation::error::{BabaError, BabaResult};
use crate::render::frame::FrameRGBA;

/// Side of the square pixelation block.
pub const BLOCK_SIZE: u32 = 4;

/// Blocks whose sample luminance is strictly above this become foreground.
pub const LUMA_THRESHOLD: f64 = 127.0;

/// Pixelate a luminance-mask frame into exactly two colors.
///
/// The frame is cut into `block_size` squares from the top-left corner. Each block takes the
/// channel mean of its top-left pixel (not the block mean): above [`LUMA_THRESHOLD`] paints the
/// whole block `fg`, anything else paints it `bg`. Trailing blocks that overhang the right or
/// bottom edge are clipped to the frame. The input is left untouched.
pub fn quantize_frame(
    frame: &FrameRGBA,
    block_size: u32,
    bg: Rgb8,
    fg: Rgb8,
) -> BabaResult<FrameRGBA> {
    if block_size == 0 {
        return Err(BabaError::validation("block_size must be > 0"));
    }
    let (w, h) = (frame.width as usize, frame.height as usize);
    if frame.data.len() != w * h * 4 {
        return Err(BabaError::validation(
            "frame.data size mismatch with width*height*4",
        ));
    }

    let bg = bg.to_rgba8();
    let fg = fg.to_rgba8();
    let block = block_size as usize;
    let mut out = vec![0u8; frame.data.len()];

    for by in (0..h).step_by(block) {
        for bx in (0..w).step_by(block) {
            let i = (by * w + bx) * 4;
            let s = &frame.data[i..i + 3];
            let luma = (f64::from(s[0]) + f64::from(s[1]) + f64::from(s[2])) / 3.0;
            let rgba = if luma > LUMA_THRESHOLD { fg } else { bg };

            let x_end = (bx + block).min(w);
            for y in by..(by + block).min(h) {
                let row = &mut out[(y * w + bx) * 4..(y * w + x_end) * 4];
                for px in row.chunks_exact_mut(4) {
                    px.copy_from_slice(&rgba);
                }
            }
        }
    }

    FrameRGBA::from_rgba8(frame.width, frame.height, out)
}

#[cfg(test)]
#[path = "../../tests/unit/quantize/pixelate.rs"]
mod tests;
