//! Compute backends for filter primitives.
//!
//! Provides a rayon CPU backend and a single-threaded scalar backend with
//! automatic selection.
//!
//! # Architecture
//!
//! ```text
//! FilterPrimitives
//!     +-- CpuPrimitives    (rayon parallelization)
//!     +-- ScalarPrimitives (sequential reference)
//! ```
//!
//! Both backends run the same row kernels from `kernels`, so their output
//! is bit-identical.

mod primitives;
mod kernels;
mod detect;
mod cpu_backend;

// Core types
pub use primitives::{FilterPrimitives, ImageHandle, BackendLimits};
pub use detect::{detect_backends, select_best_backend, describe_backends, BackendInfo};

// Backends
pub use cpu_backend::{CpuImage, CpuPrimitives, ScalarPrimitives};

/// Largest blur radius the backends accept.
pub const MAX_BLUR_RADIUS: f32 = 25.0;

/// Available compute backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Auto-select best available (CPU > scalar).
    #[default]
    Auto,
    /// CPU backend using rayon for parallelization.
    Cpu,
    /// Single-threaded scalar backend.
    Scalar,
}

impl Backend {
    /// Check if this backend is available on current system.
    pub fn is_available(&self) -> bool {
        match self {
            Self::Auto | Self::Cpu | Self::Scalar => true,
        }
    }

    /// Get human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Cpu => "cpu",
            Self::Scalar => "scalar",
        }
    }

    /// Parses a backend name as accepted on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "cpu" | "rayon" => Some(Self::Cpu),
            "scalar" | "reference" => Some(Self::Scalar),
            _ => None,
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Filter operation submitted to a backend.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterOp {
    /// Gaussian blur with radius in `(0, 25]`.
    Blur { radius: f32 },
    /// 5x5 convolution, row-major coefficients.
    Convolve5x5 { coefficients: [f32; 25] },
    /// 3x3 colour matrix on RGB, row-major (row k produces channel k).
    ColorMatrix3x3 { matrix: [f32; 9] },
}

impl FilterOp {
    /// Short operation name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Blur { .. } => "blur",
            Self::Convolve5x5 { .. } => "convolve5x5",
            Self::ColorMatrix3x3 { .. } => "color_matrix3x3",
        }
    }

    /// Executes this operation on `src` into `dst` with the given primitives.
    pub fn execute<G: FilterPrimitives>(
        &self,
        gpu: &G,
        src: &G::Handle,
        dst: &mut G::Handle,
    ) -> crate::ComputeResult<()> {
        match self {
            Self::Blur { radius } => gpu.exec_blur(src, dst, *radius),
            Self::Convolve5x5 { coefficients } => gpu.exec_convolve5x5(src, dst, coefficients),
            Self::ColorMatrix3x3 { matrix } => gpu.exec_color_matrix3x3(src, dst, matrix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_names() {
        assert_eq!(Backend::from_name("CPU"), Some(Backend::Cpu));
        assert_eq!(Backend::from_name("reference"), Some(Backend::Scalar));
        assert_eq!(Backend::from_name("cuda"), None);
        assert_eq!(Backend::Auto.to_string(), "auto");
    }

    #[test]
    fn test_filter_op_names() {
        assert_eq!(FilterOp::Blur { radius: 1.0 }.name(), "blur");
        let m = FilterOp::ColorMatrix3x3 { matrix: [0.0; 9] };
        assert_eq!(m.name(), "color_matrix3x3");
    }
}
