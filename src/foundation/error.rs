/// Convenience result type used across the crate.
pub type KaraokeResult<T> = Result<T, KaraokeError>;

/// Top-level error taxonomy used by karaoke APIs.
#[derive(thiserror::Error, Debug)]
pub enum KaraokeError {
    /// Invalid user-provided configuration or input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed timecode or transcript fragment in a strict parsing helper.
    #[error("parse error: {0}")]
    Parse(String),

    /// Neither the transcript nor the lyrics contain anything that can be timed.
    #[error("no alignable content: {0}")]
    NoAlignableContent(String),

    /// Errors while laying out or rasterizing a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KaraokeError {
    /// Build a [`KaraokeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KaraokeError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`KaraokeError::NoAlignableContent`] value.
    pub fn no_alignable_content(msg: impl Into<String>) -> Self {
        Self::NoAlignableContent(msg.into())
    }

    /// Build a [`KaraokeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`KaraokeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this error means "no karaoke possible" rather than a fault.
    pub fn is_no_alignable_content(&self) -> bool {
        matches!(self, Self::NoAlignableContent(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
