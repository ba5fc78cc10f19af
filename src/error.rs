//! Error types.
//!
//! Per-triangle conditions ([`RasterError`]) are never fatal to a render pass:
//! the pass skips the triangle and counts it in its
//! [`PassReport`](crate::render::PassReport). The remaining types cover buffer
//! construction, configuration and asset ingestion.

use std::path::PathBuf;

/// Conditions that cause a single triangle to be skipped.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum RasterError {
    /// A vertex landed on the camera plane (`w == 0`) or its perspective
    /// divide overflowed.
    #[error("vertex transform produced w = {w}; perspective divide is undefined")]
    DegenerateTransform { w: f32 },

    /// The triangle has zero area in screen space.
    #[error("triangle has zero screen-space area")]
    DegenerateTriangle,
}

/// Invalid buffer construction.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("buffer dimensions must be non-zero, got {width}x{height}")]
    ZeroSized { width: u32, height: u32 },

    #[error("texture dimensions must be powers of two, got {width}x{height}")]
    NotPowerOfTwo { width: u32, height: u32 },

    #[error("expected {expected} elements for the given dimensions, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("vertex count {0} is not a multiple of 3")]
    IncompleteTriangle(usize),
}

/// Failures while loading or validating a [`RenderConfig`](crate::RenderConfig).
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Failures while preparing texture data for the core.
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Buffer(#[from] BufferError),
}
