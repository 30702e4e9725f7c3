//! CLI command implementations

pub mod apply;
pub mod backends;
pub mod replay;
pub mod sweep;
#[cfg(feature = "viewer")]
pub mod view;

use anyhow::{Context, Result};
use slidefx_core::Image;
use slidefx_ops::{Backend, FilterMode, FilterSession, SessionConfig};
use std::path::Path;

/// Opens a filter session on `input`, or on the demo pattern when absent.
pub fn open_session(input: Option<&Path>, backend: Backend, mode: FilterMode) -> Result<FilterSession> {
    let provider = slidefx_io::source_for(input).with_context(|| match input {
        Some(p) => format!("Failed to open: {}", p.display()),
        None => "Failed to create demo source".to_string(),
    })?;
    SessionConfig::new()
        .backend(backend)
        .mode(mode)
        .build(provider)
        .context("Failed to start filter session")
}

/// Save image to path
pub fn save_image(path: &Path, image: &Image) -> Result<()> {
    slidefx_io::write(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}
