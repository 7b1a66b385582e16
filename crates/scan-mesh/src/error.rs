//! Error types for the mesh pipeline.

use polar_grid::DecodeError;
use thiserror::Error;

/// Errors surfaced by a pipeline rebuild.
///
/// A failed rebuild never touches the scan cache or a previously published
/// mesh; the caller may simply retry or move on to the next scan.
#[derive(Error, Debug)]
pub enum MeshError {
    /// Scan metadata or sample grid failed validation.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The scan source failed to produce a payload.
    #[error("scan source error: {0}")]
    Source(String),
}

impl MeshError {
    /// Create a Source error.
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }
}

/// Result type for mesh pipeline operations.
pub type Result<T> = std::result::Result<T, MeshError>;
