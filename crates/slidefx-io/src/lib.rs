//! # slidefx-io
//!
//! PNG reading and writing for [`slidefx_core::Image`], plus a
//! [`SourceProvider`](slidefx_ops::SourceProvider) backed by a PNG file.
//!
//! Every decoded image is converted to RGBA8; every written image is RGBA8.
//!
//! # Example
//!
//! ```rust,ignore
//! use slidefx_io::{read, write};
//!
//! let image = read("input.png")?;
//! write("output.png", &image)?;
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub mod png;
mod source;

pub use png::{read, write};
pub use source::{PngSource, source_for};

/// I/O error type.
#[derive(Error, Debug)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Unsupported colour type or bit depth.
    #[error("unsupported pixel format: {0}")]
    UnsupportedFormat(String),

    /// File extension is not `.png`.
    #[error("not a PNG path: {}", .0.display())]
    NotPng(PathBuf),

    /// Decoded buffer did not form a valid image.
    #[error(transparent)]
    Image(#[from] slidefx_core::Error),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
