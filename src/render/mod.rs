//! Layout & rasterization: text plus config in, raw luminance-mask frames out.

pub(crate) mod fonts;
pub(crate) mod frame;
pub(crate) mod jitter;
pub(crate) mod layout;
pub(crate) mod rasterizer;
