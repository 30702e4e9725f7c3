//! Slider position to filter parameter mapping.
//!
//! Each [`FilterMode`] owns a `[min, max]` range; the slider position
//! `0..=100` interpolates linearly across it:
//!
//! ```text
//! f = (max - min) * (slider / 100) + min
//! ```
//!
//! | Mode        | min  | max  | parameter meaning        |
//! |-------------|------|------|--------------------------|
//! | Blur        | 1    | 25   | blur radius (pixels)     |
//! | Convolve    | 0    | 2    | emboss blend factor `f1` |
//! | ColorMatrix | -pi  | pi   | hue rotation (radians)   |
//!
//! The arithmetic is done in `f64` and narrowed to `f32` at the end.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::OpsError;

/// Active filter kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilterMode {
    /// Gaussian blur.
    #[default]
    Blur,
    /// 5x5 emboss convolution.
    Convolve,
    /// Luma-preserving hue rotation.
    ColorMatrix,
}

impl FilterMode {
    /// All modes in selector order.
    pub const ALL: [FilterMode; 3] = [Self::Blur, Self::Convolve, Self::ColorMatrix];

    /// Parameter bounds `(min, max)`.
    pub fn range(self) -> (f64, f64) {
        match self {
            Self::Blur => (1.0, 25.0),
            Self::Convolve => (0.0, 2.0),
            Self::ColorMatrix => (-PI, PI),
        }
    }

    /// Machine name, used on the command line and in file names.
    pub fn name(self) -> &'static str {
        match self {
            Self::Blur => "blur",
            Self::Convolve => "convolve",
            Self::ColorMatrix => "colormatrix",
        }
    }

    /// Label for the mode selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Blur => "Blur",
            Self::Convolve => "Convolve",
            Self::ColorMatrix => "Color matrix",
        }
    }

    /// Parses a mode name. Case-insensitive; accepts a few aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "blur" | "gaussian" => Some(Self::Blur),
            "convolve" | "convolve5x5" | "emboss" => Some(Self::Convolve),
            "colormatrix" | "color-matrix" | "color_matrix" | "hue" => Some(Self::ColorMatrix),
            _ => None,
        }
    }

    /// Position in [`FilterMode::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Blur => 0,
            Self::Convolve => 1,
            Self::ColorMatrix => 2,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for FilterMode {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| OpsError::UnknownMode(s.to_string()))
    }
}

/// Slider position in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SliderPosition(u8);

impl SliderPosition {
    /// Leftmost position.
    pub const MIN: SliderPosition = SliderPosition(0);
    /// Rightmost position.
    pub const MAX: SliderPosition = SliderPosition(100);

    /// Creates a position, clamping `value` into `0..=100`.
    pub fn new(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    /// Raw position.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Position as a fraction in `[0, 1]`.
    pub fn fraction(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl From<u8> for SliderPosition {
    fn from(value: u8) -> Self {
        Self::new(value as i64)
    }
}

impl fmt::Display for SliderPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Maps a slider position to the parameter of `mode`.
pub fn map(mode: FilterMode, slider: SliderPosition) -> f32 {
    let (min, max) = mode.range();
    ((max - min) * slider.fraction() + min) as f32
}
