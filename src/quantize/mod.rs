//! Two-color block pixelation of raw frames.

pub(crate) mod pixelate;
