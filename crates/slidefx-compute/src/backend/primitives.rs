//! Primitive abstraction shared by all filter backends.

use crate::{ComputeError, ComputeResult};

/// Bytes per RGBA8 pixel.
const BYTES_PER_PIXEL: u64 = 4;

/// Handle to an image in backend memory.
pub trait ImageHandle: Send + Sync {
    /// Image dimensions (width, height).
    fn dimensions(&self) -> (u32, u32);

    /// Width.
    fn width(&self) -> u32 { self.dimensions().0 }

    /// Height.
    fn height(&self) -> u32 { self.dimensions().1 }

    /// Size in bytes of backend memory used.
    fn size_bytes(&self) -> u64 {
        let (w, h) = self.dimensions();
        (w as u64) * (h as u64) * BYTES_PER_PIXEL
    }
}

/// Backend resource limits.
#[derive(Debug, Clone)]
pub struct BackendLimits {
    /// Maximum image dimension (width or height).
    pub max_dim: u32,
    /// Memory available for allocations in bytes.
    pub available_memory: u64,
    /// Whether values were detected vs defaults.
    pub detected: bool,
}

impl Default for BackendLimits {
    fn default() -> Self {
        Self {
            max_dim: 16384,
            available_memory: 4 * 1024 * 1024 * 1024,
            detected: false,
        }
    }
}

impl BackendLimits {
    /// Checks that an image of `width` x `height` can be allocated.
    ///
    /// Each invocation holds the input, the output and one float scratch
    /// buffer (4x the byte size), so the budget is six image sizes.
    pub fn check(&self, width: u32, height: u32) -> ComputeResult<()> {
        if width == 0 || height == 0 || width > self.max_dim || height > self.max_dim {
            return Err(ComputeError::InvalidDimensions(width, height));
        }
        let requested = (width as u64) * (height as u64) * BYTES_PER_PIXEL * 6;
        if requested > self.available_memory {
            return Err(ComputeError::OutOfMemory {
                width,
                height,
                requested,
                available: self.available_memory,
            });
        }
        Ok(())
    }
}

/// Core filter operations abstraction.
pub trait FilterPrimitives: Send + Sync {
    /// Backend-specific image handle type.
    type Handle: ImageHandle;

    /// Allocate an image buffer.
    fn allocate(&self, width: u32, height: u32) -> ComputeResult<Self::Handle>;

    /// Copy RGBA8 data into an existing allocation.
    fn upload(&self, handle: &mut Self::Handle, data: &[u8]) -> ComputeResult<()>;

    /// Copy an allocation back to host memory.
    fn download(&self, handle: &Self::Handle) -> ComputeResult<Vec<u8>>;

    /// Execute Gaussian blur kernel.
    fn exec_blur(&self, src: &Self::Handle, dst: &mut Self::Handle, radius: f32) -> ComputeResult<()>;

    /// Execute 5x5 convolution kernel.
    fn exec_convolve5x5(&self, src: &Self::Handle, dst: &mut Self::Handle,
                        coefficients: &[f32; 25]) -> ComputeResult<()>;

    /// Execute 3x3 colour matrix kernel (alpha passes through).
    fn exec_color_matrix3x3(&self, src: &Self::Handle, dst: &mut Self::Handle,
                            matrix: &[f32; 9]) -> ComputeResult<()>;

    /// Get backend limits.
    fn limits(&self) -> &BackendLimits;

    /// Backend name.
    fn name(&self) -> &'static str;
}
