//! PNG-backed source provider.

use std::path::{Path, PathBuf};

use slidefx_core::Image;
use slidefx_ops::{DemoSource, OpsError, OpsResult, SourceProvider};

use crate::{IoError, IoResult};

/// Loads the source image from a PNG file on every reset.
#[derive(Debug, Clone)]
pub struct PngSource {
    path: PathBuf,
}

impl PngSource {
    /// Creates a provider for `path`. The file is read lazily.
    pub fn new(path: impl Into<PathBuf>) -> IoResult<Self> {
        let path = path.into();
        let is_png = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("png"));
        if !is_png {
            return Err(IoError::NotPng(path));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SourceProvider for PngSource {
    fn load(&self) -> OpsResult<Image> {
        crate::png::read(&self.path)
            .map_err(|e| OpsError::Source(format!("{}: {}", self.path.display(), e)))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Provider for an optional input path: the PNG if given, else the demo pattern.
pub fn source_for(path: Option<&Path>) -> IoResult<Box<dyn SourceProvider>> {
    match path {
        Some(p) => Ok(Box::new(PngSource::new(p)?)),
        None => Ok(Box::new(DemoSource::new())),
    }
}
