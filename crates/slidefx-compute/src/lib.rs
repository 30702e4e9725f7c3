//! Filter backends for slidefx.
//!
//! Provides the three image primitives the application drives (Gaussian
//! blur, 5x5 convolution, 3x3 colour matrix) behind one backend seam, plus
//! the session object that owns backend allocations for the lifetime of a
//! filter session.
//!
//! # Architecture
//!
//! ```text
//! AnySession (runtime-selected)
//!     └── BackendSession<G: FilterPrimitives>
//!             ├── CpuPrimitives    (rayon, one task per row)
//!             └── ScalarPrimitives (single thread, reference)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use slidefx_compute::{Backend, FilterOp, create_session};
//!
//! let mut session = create_session(Backend::Auto, 640, 480)?;
//! let out = session.run(src.data(), &FilterOp::Blur { radius: 8.0 })?;
//! session.destroy();
//! ```

pub mod backend;
pub mod session;

pub use backend::{
    Backend, BackendInfo, BackendLimits, CpuImage, CpuPrimitives, FilterOp, FilterPrimitives,
    ImageHandle, ScalarPrimitives, MAX_BLUR_RADIUS, describe_backends, detect_backends,
    select_best_backend,
};
pub use session::{AnySession, BackendSession, create_session};

use thiserror::Error;

/// Backend operation errors
#[derive(Error, Debug)]
pub enum ComputeError {
    #[error("Backend not available: {0}")]
    BackendNotAvailable(String),

    #[error("Buffer size mismatch: expected {expected}, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("Image too large: {width}x{height} needs {requested} bytes, {available} available")]
    OutOfMemory {
        width: u32,
        height: u32,
        requested: u64,
        available: u64,
    },

    #[error("Invalid dimensions: {0}x{1}")]
    InvalidDimensions(u32, u32),

    #[error("Dimension mismatch: {0:?} vs {1:?}")]
    DimensionMismatch((u32, u32), (u32, u32)),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Backend session has been destroyed")]
    SessionDisposed,

    #[error(transparent)]
    Core(#[from] slidefx_core::Error),
}

pub type ComputeResult<T> = Result<T, ComputeError>;
