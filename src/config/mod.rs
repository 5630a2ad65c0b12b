//! User-facing parameters for one icon.

pub(crate) mod color;
pub(crate) mod render_config;
