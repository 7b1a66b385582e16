//! Error types for scan decoding.

use thiserror::Error;

/// Errors raised while turning a decoded payload into a [`crate::PolarScan`].
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The sample grid's size disagrees with the declared (nazs, ngates).
    #[error("sample grid has {actual} values, expected {nazs} x {ngates} = {expected}")]
    ShapeMismatch {
        nazs: usize,
        ngates: usize,
        expected: usize,
        actual: usize,
    },

    /// The azimuth list's length disagrees with the declared ray count.
    #[error("azimuth list has {actual} entries, expected {expected}")]
    AzimuthCountMismatch { expected: usize, actual: usize },

    /// A required metadata field is absent or malformed.
    #[error("invalid scan metadata: {0}")]
    InvalidMetadata(String),

    /// The metadata document failed to deserialize.
    #[error("malformed scan metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}

impl DecodeError {
    /// Create an InvalidMetadata error.
    pub fn invalid_metadata(msg: impl Into<String>) -> Self {
        Self::InvalidMetadata(msg.into())
    }
}
