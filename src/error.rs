//! Error type shared by the rendering kernel.

use thiserror::Error;

/// Errors that can abort a render.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A rejection sampler ran out of attempts without accepting a sample.
    ///
    /// Only a broken random source can trigger this.
    #[error("{sampler} rejected {attempts} consecutive samples")]
    SamplingExhausted {
        /// Name of the sampling routine that gave up
        sampler: &'static str,
        /// Number of attempts made before giving up
        attempts: usize,
    },

    /// Camera configuration that cannot produce an image.
    #[error("invalid camera configuration: {0}")]
    InvalidConfig(String),

    /// Writing the pixel stream failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Encoding or saving an image file failed.
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, RenderError>;
