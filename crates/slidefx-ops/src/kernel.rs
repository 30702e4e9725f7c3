//! Filter input builders.
//!
//! - [`emboss_coefficients`] - 5x5 emboss kernel blended by `f1`
//! - [`hue_rotation_matrix`] - luma-preserving hue rotation by an angle
//!
//! # Emboss kernel
//!
//! With `f2 = 1 - f1`, row-major:
//!
//! ```text
//! -2f1    0   -f1    0     0
//!    0 -2f2   -f2    0     0
//!  -f1  -f2     1   f2    f1
//!    0    0    f2  2f2     0
//!    0    0    f1    0   2f1
//! ```
//!
//! The centre is always 1 and the negative half mirrors the positive half,
//! so the weights sum to 1 for every `f1`.

use glam::{Mat3, Vec3};

/// Builds the 5x5 emboss coefficients for blend factor `f1`.
#[rustfmt::skip]
pub fn emboss_coefficients(f1: f32) -> [f32; 25] {
    let f2 = 1.0 - f1;
    [
        -2.0 * f1, 0.0, -f1, 0.0, 0.0,
        0.0, -2.0 * f2, -f2, 0.0, 0.0,
        -f1, -f2, 1.0, f2, f1,
        0.0, 0.0, f2, 2.0 * f2, 0.0,
        0.0, 0.0, f1, 0.0, 2.0 * f1,
    ]
}

/// 3x3 colour matrix acting on `(r, g, b)`.
///
/// Row k of the matrix produces output channel k.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix3(Mat3);

impl ColorMatrix3 {
    /// Identity transform.
    pub const IDENTITY: ColorMatrix3 = ColorMatrix3(Mat3::IDENTITY);

    /// Creates a matrix from three rows.
    pub fn from_rows(r0: [f32; 3], r1: [f32; 3], r2: [f32; 3]) -> Self {
        Self(Mat3::from_cols(Vec3::from(r0), Vec3::from(r1), Vec3::from(r2)).transpose())
    }

    /// Row-major coefficients, the layout the backends consume.
    pub fn to_row_major(&self) -> [f32; 9] {
        self.0.transpose().to_cols_array()
    }

    /// Row `index` (coefficients of output channel `index`).
    pub fn row(&self, index: usize) -> [f32; 3] {
        self.0.row(index).to_array()
    }

    /// Applies the matrix to a normalized RGB triple.
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        (self.0 * Vec3::from(rgb)).to_array()
    }

    /// Element-wise comparison within `max_abs_diff`.
    pub fn abs_diff_eq(&self, other: &Self, max_abs_diff: f32) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }
}

/// Builds the luma-preserving hue rotation for `angle` radians.
///
/// Uses the Rec.601 luma weights (0.299, 0.587, 0.114). At angle 0 the
/// result is identity except for a -0.001 residue in the last row.
pub fn hue_rotation_matrix(angle: f32) -> ColorMatrix3 {
    let c = angle.cos();
    let s = angle.sin();
    ColorMatrix3::from_rows(
        [
            0.299 + 0.701 * c + 0.168 * s,
            0.587 - 0.587 * c + 0.330 * s,
            0.114 - 0.114 * c - 0.497 * s,
        ],
        [
            0.299 - 0.299 * c - 0.328 * s,
            0.587 + 0.413 * c + 0.035 * s,
            0.114 - 0.114 * c + 0.292 * s,
        ],
        [
            0.299 - 0.300 * c + 1.250 * s,
            0.587 - 0.588 * c - 1.050 * s,
            0.114 + 0.886 * c - 0.203 * s,
        ],
    )
}
