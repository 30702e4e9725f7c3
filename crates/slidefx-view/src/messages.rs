//! Message types for UI <-> Worker communication.
//!
//! UI sends commands, worker answers with events.

use std::path::PathBuf;

use egui::Color32;
use slidefx_ops::{FilterMode, SliderPosition};

/// Generation counter for invalidating stale frames.
pub type Generation = u64;

/// Messages from UI thread to worker thread.
#[derive(Debug, Clone)]
pub enum ViewerMsg {
    /// Load a PNG file (None = built-in demo pattern).
    LoadImage(Option<PathBuf>, Generation),

    /// Mode selector changed.
    SelectMode(FilterMode, Generation),

    /// Slider moved.
    SetSlider(SliderPosition, Generation),

    /// Close viewer.
    Close,
}

/// Events from worker thread to UI thread.
#[derive(Debug)]
pub enum ViewerEvent {
    /// Source loaded and backend session established.
    SessionReady {
        source: String,
        path: Option<PathBuf>,
        dims: (u32, u32),
        backend: &'static str,
        mode: FilterMode,
    },

    /// Image to display.
    Frame {
        generation: Generation,
        width: u32,
        height: u32,
        pixels: Vec<Color32>,
        showing_source: bool,
        mode: FilterMode,
        parameter: f32,
    },

    /// Error occurred; the previous frame stays on screen.
    Error(String),
}
