/// Convenience result type used across coghaz.
pub type CoghazResult<T> = Result<T, CoghazError>;

/// Top-level error taxonomy used by generator APIs.
#[derive(thiserror::Error, Debug)]
pub enum CoghazError {
    /// Empty text, unloadable font, or out-of-range generator parameters.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Requested canvas height/width outside the supported range.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// The glyph run had no ink, so there is nothing to place.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// The output image could not be encoded or persisted.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoghazError {
    /// Build a [`CoghazError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`CoghazError::InvalidDimension`] value.
    pub fn invalid_dimension(msg: impl Into<String>) -> Self {
        Self::InvalidDimension(msg.into())
    }

    /// Build a [`CoghazError::EmptyInput`] value.
    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    /// Build a [`CoghazError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
