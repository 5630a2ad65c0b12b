//! Encoding sinks.
//!
//! Sinks consume palette-reduced frames in animation order and produce the downloadable artifact.

/// Looping GIF output.
pub mod gif;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
