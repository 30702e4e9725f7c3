//! # slidefx-core
//!
//! Core types shared by every slidefx crate.
//!
//! - [`Image`] - RGBA8 pixel buffer used for source, destination and display
//! - [`Error`], [`Result`] - buffer-level errors
//! - [`pattern`] - built-in demo source image
//!
//! ## Crate Structure
//!
//! ```text
//! slidefx-core (this crate)
//!    ^
//!    |
//!    +-- slidefx-compute (filter backends)
//!    +-- slidefx-ops (parameter mapping, dispatch, session)
//!    +-- slidefx-io (PNG I/O)
//!    +-- slidefx-view, slidefx-cli (front ends)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pattern;

pub use error::{Error, Result};
pub use image::{Image, CHANNELS};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use slidefx_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::{Image, CHANNELS};
    pub use crate::pattern::demo_image;
}
