//! Pipeline owner: config in, frames plus artifact plus playback out.

pub(crate) mod icon_session;
