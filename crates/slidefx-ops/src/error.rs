//! Error types for filter operations.

use slidefx_compute::ComputeError;
use thiserror::Error;

/// Error type for filter operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Backend invocation failed.
    #[error("backend error: {0}")]
    Compute(#[from] ComputeError),

    /// Image buffer error.
    #[error(transparent)]
    Core(#[from] slidefx_core::Error),

    /// Source image could not be loaded.
    #[error("failed to load source image: {0}")]
    Source(String),

    /// Unrecognized filter mode name.
    #[error("unknown filter mode '{0}' (expected blur, convolve or colormatrix)")]
    UnknownMode(String),
}

impl OpsError {
    /// Whether this is a backend invocation failure.
    pub fn is_backend_failure(&self) -> bool {
        matches!(self, Self::Compute(_))
    }
}

/// Result type for filter operations.
pub type OpsResult<T> = Result<T, OpsError>;
