//! Overlay error types

use thiserror::Error;

/// Failure to turn an embedded sprite asset into a usable pixel surface.
///
/// These are non-fatal: a failed sprite leaves the owning overlay unmapped
/// and a later `map()` retries the whole pipeline.
#[derive(Error, Debug)]
pub enum SpriteError {
    /// The embedded bytes did not decode as an image
    #[error("sprite decode failed: {0}")]
    Decode(#[from] image::ImageError),

    /// The sprite decoded to zero width or height
    #[error("sprite has zero width or height")]
    Degenerate,
}
