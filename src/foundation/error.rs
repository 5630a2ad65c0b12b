/// Convenience result type used across babagif.
pub type BabaResult<T> = Result<T, BabaError>;

/// Top-level error taxonomy used by the pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum BabaError {
    /// Invalid user-provided configuration or API misuse.
    #[error("validation error: {0}")]
    Validation(String),

    /// The raster environment could not produce a frame.
    #[error("render error: {0}")]
    Render(String),

    /// The animated-image encoder rejected the frame sequence.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Filesystem errors while reading config or writing artifacts.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BabaError {
    /// Build a [`BabaError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BabaError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`BabaError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`BabaError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
