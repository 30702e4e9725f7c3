//! Filter dispatch.
//!
//! Turns a mode and a mapped parameter into the backend-specific input and
//! runs it against the source image.

use slidefx_compute::{AnySession, Backend, FilterOp, create_session};
use slidefx_core::Image;
use tracing::debug;

use crate::kernel::{ColorMatrix3, emboss_coefficients, hue_rotation_matrix};
use crate::mapper::{FilterMode, SliderPosition, map};
use crate::OpsResult;

/// Backend input for one filter invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterRequest {
    /// Gaussian blur with the parameter used directly as radius.
    Blur { radius: f32 },
    /// 5x5 convolution with the emboss coefficients.
    Convolve { coefficients: [f32; 25] },
    /// Hue rotation matrix.
    ColorMatrix { matrix: ColorMatrix3 },
}

impl FilterRequest {
    /// Builds the request for `mode` from a mapped `parameter`.
    pub fn build(mode: FilterMode, parameter: f32) -> Self {
        match mode {
            FilterMode::Blur => Self::Blur { radius: parameter },
            FilterMode::Convolve => Self::Convolve {
                coefficients: emboss_coefficients(parameter),
            },
            FilterMode::ColorMatrix => Self::ColorMatrix {
                matrix: hue_rotation_matrix(parameter),
            },
        }
    }

    /// Maps `slider` and builds the request in one step.
    pub fn from_slider(mode: FilterMode, slider: SliderPosition) -> Self {
        Self::build(mode, map(mode, slider))
    }

    /// Mode this request belongs to.
    pub fn mode(&self) -> FilterMode {
        match self {
            Self::Blur { .. } => FilterMode::Blur,
            Self::Convolve { .. } => FilterMode::Convolve,
            Self::ColorMatrix { .. } => FilterMode::ColorMatrix,
        }
    }

    /// Backend operation for this request.
    pub fn to_op(&self) -> FilterOp {
        match self {
            Self::Blur { radius } => FilterOp::Blur { radius: *radius },
            Self::Convolve { coefficients } => FilterOp::Convolve5x5 {
                coefficients: *coefficients,
            },
            Self::ColorMatrix { matrix } => FilterOp::ColorMatrix3x3 {
                matrix: matrix.to_row_major(),
            },
        }
    }
}

/// Runs `request` on `source` through an established backend session.
///
/// Returns a new destination image of the source dimensions. Backend
/// failures are returned as-is; nothing is retried.
pub fn apply(backend: &mut AnySession, request: &FilterRequest, source: &Image) -> OpsResult<Image> {
    debug!(mode = %request.mode(), backend = backend.name(), "apply");
    Ok(backend.run_image(source, &request.to_op())?)
}

/// One-shot render: creates a session, applies `mode` at `slider`, releases it.
pub fn render(backend: Backend, mode: FilterMode, slider: SliderPosition, source: &Image) -> OpsResult<Image> {
    let (w, h) = source.dimensions();
    let mut session = create_session(backend, w, h)?;
    let out = apply(&mut session, &FilterRequest::from_slider(mode, slider), source);
    session.destroy();
    out
}
