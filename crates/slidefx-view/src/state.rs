//! Viewer state and persistence.
//!
//! Stores UI state that persists between sessions via eframe storage.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use slidefx_ops::FilterMode;

/// Persistent viewer settings (saved between sessions).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerPersistence {
    /// Last opened file path.
    pub last_file: Option<PathBuf>,
    /// Last selected filter mode.
    pub mode: FilterMode,
}

/// Runtime viewer state (not persisted).
#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    /// Active filter mode.
    pub mode: FilterMode,
    /// Slider value bound to the egui slider.
    pub slider: u8,
    /// Parameter of the frame on display.
    pub parameter: Option<f32>,
    /// Whether the frame on display is the unfiltered source.
    pub showing_source: bool,

    /// Source description.
    pub source: String,
    /// Source file path (None = demo pattern).
    pub image_path: Option<PathBuf>,
    /// Image dimensions.
    pub image_dims: Option<(u32, u32)>,
    /// Backend name.
    pub backend: &'static str,
}

impl ViewerState {
    /// Creates state from persistence and CLI override.
    pub fn from_persistence(persistence: &ViewerPersistence, mode_override: Option<FilterMode>) -> Self {
        Self {
            mode: mode_override.unwrap_or(persistence.mode),
            image_path: persistence.last_file.clone(),
            showing_source: true,
            ..Default::default()
        }
    }

    /// Converts to persistence for saving.
    pub fn to_persistence(&self) -> ViewerPersistence {
        ViewerPersistence {
            last_file: self.image_path.clone(),
            mode: self.mode,
        }
    }

    /// Status line text for the current frame.
    pub fn status(&self) -> String {
        let (min, max) = self.mode.range();
        match self.parameter {
            Some(p) if !self.showing_source => {
                format!("{} {:.3} (range {:.2}..{:.2})", self.mode.label(), p, min, max)
            }
            _ => format!("{}: source", self.mode.label()),
        }
    }
}
