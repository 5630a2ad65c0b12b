use kurbo::{Affine, Point};

use crate::foundation::math::Rng64;

/// Maximum absolute rotation (radians) and shear applied to a glyph.
pub const JITTER_AMPLITUDE: f64 = 0.1;

/// Per-glyph random distortion.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Jitter {
    /// Rotation in radians.
    pub rotation: f64,
    /// Vertical shear (`y += shear_y * x`).
    pub shear_y: f64,
    /// Horizontal shear (`x += shear_x * y`).
    pub shear_x: f64,
}

impl Jitter {
    /// Glyph transform anchored at `center`: translate, then rotate, then shear.
    pub fn transform_at(self, center: Point) -> Affine {
        Affine::translate(center.to_vec2())
            * Affine::rotate(self.rotation)
            * Affine::new([1.0, self.shear_y, self.shear_x, 1.0, 0.0, 0.0])
    }
}

/// Source of per-glyph jitter. Each rendered frame takes its own source.
pub trait JitterSource {
    /// Jitter for the next glyph.
    fn next_jitter(&mut self) -> Jitter;
}

/// Seeded jitter stream; the same seed reproduces the same frame.
#[derive(Clone, Debug)]
pub struct SeededJitter {
    rng: Rng64,
}

impl SeededJitter {
    /// Start a stream at `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng64::new(seed),
        }
    }

    fn sample(&mut self) -> f64 {
        (self.rng.next_f64_01() - 0.5) * 2.0 * JITTER_AMPLITUDE
    }
}

impl JitterSource for SeededJitter {
    fn next_jitter(&mut self) -> Jitter {
        let rotation = self.sample();
        let shear_y = self.sample();
        let shear_x = self.sample();
        Jitter {
            rotation,
            shear_y,
            shear_x,
        }
    }
}

/// Always returns zero jitter.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn next_jitter(&mut self) -> Jitter {
        Jitter::default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/jitter.rs"]
mod tests;
