//! CPU backends: rayon-parallel and single-threaded scalar.

use rayon::prelude::*;
use tracing::trace;

use super::kernels;
use super::primitives::{BackendLimits, FilterPrimitives, ImageHandle};
use super::MAX_BLUR_RADIUS;
use crate::{ComputeError, ComputeResult};

const C: usize = 4;

/// CPU image handle - RGBA8 data stored in RAM.
pub struct CpuImage {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl CpuImage {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self { data, width, height }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl ImageHandle for CpuImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// CPU primitives implementation.
pub struct CpuPrimitives {
    limits: BackendLimits,
    parallel: bool,
}

impl CpuPrimitives {
    pub fn new() -> Self {
        Self::with_parallel(true)
    }

    fn with_parallel(parallel: bool) -> Self {
        // Get system RAM (fallback to defaults if detection fails)
        let limits = sys_info::mem_info()
            .map(|m| BackendLimits {
                available_memory: m.avail * 1024,
                detected: true,
                ..BackendLimits::default()
            })
            .unwrap_or_default();
        Self { limits, parallel }
    }

    fn check_pair(&self, src: &CpuImage, dst: &CpuImage) -> ComputeResult<(usize, usize)> {
        let (w, h) = src.dimensions();
        if w == 0 || h == 0 {
            return Err(ComputeError::InvalidDimensions(w, h));
        }
        if src.dimensions() != dst.dimensions() {
            return Err(ComputeError::DimensionMismatch(src.dimensions(), dst.dimensions()));
        }
        Ok((w as usize, h as usize))
    }

    /// Runs `f` for every output row, in parallel or in order.
    fn for_each_row<T, F>(&self, out: &mut [T], row_len: usize, f: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Send + Sync,
    {
        if self.parallel {
            out.par_chunks_mut(row_len).enumerate().for_each(|(y, row)| f(y, row));
        } else {
            out.chunks_mut(row_len).enumerate().for_each(|(y, row)| f(y, row));
        }
    }
}

impl Default for CpuPrimitives {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterPrimitives for CpuPrimitives {
    type Handle = CpuImage;

    fn allocate(&self, width: u32, height: u32) -> ComputeResult<Self::Handle> {
        self.limits.check(width, height)?;
        let size = (width as usize) * (height as usize) * C;
        Ok(CpuImage::new(vec![0; size], width, height))
    }

    fn upload(&self, handle: &mut Self::Handle, data: &[u8]) -> ComputeResult<()> {
        if data.len() != handle.data.len() {
            return Err(ComputeError::BufferSizeMismatch {
                expected: handle.data.len(),
                actual: data.len(),
            });
        }
        handle.data.copy_from_slice(data);
        Ok(())
    }

    fn download(&self, handle: &Self::Handle) -> ComputeResult<Vec<u8>> {
        Ok(handle.data.clone())
    }

    fn exec_blur(&self, src: &Self::Handle, dst: &mut Self::Handle, radius: f32) -> ComputeResult<()> {
        trace!(radius, backend = self.name(), "exec_blur");
        if !(radius > 0.0 && radius <= MAX_BLUR_RADIUS) {
            return Err(ComputeError::InvalidParameter(format!(
                "blur radius {radius} outside (0, {MAX_BLUR_RADIUS}]"
            )));
        }
        let (w, h) = self.check_pair(src, dst)?;
        let (half, weights) = kernels::gaussian_weights(radius);

        // Horizontal pass
        let mut temp = vec![0.0f32; w * h * C];
        self.for_each_row(&mut temp, w * C, |y, row| {
            kernels::blur_row_h(&src.data, w, y, half, &weights, row);
        });

        // Vertical pass
        self.for_each_row(&mut dst.data, w * C, |y, row| {
            kernels::blur_row_v(&temp, w, h, y, half, &weights, row);
        });

        Ok(())
    }

    fn exec_convolve5x5(&self, src: &Self::Handle, dst: &mut Self::Handle,
                        coefficients: &[f32; 25]) -> ComputeResult<()> {
        trace!(backend = self.name(), "exec_convolve5x5");
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ComputeError::InvalidParameter("non-finite convolution coefficient".into()));
        }
        let (w, h) = self.check_pair(src, dst)?;

        self.for_each_row(&mut dst.data, w * C, |y, row| {
            kernels::convolve_row(&src.data, w, h, y, coefficients, row);
        });

        Ok(())
    }

    fn exec_color_matrix3x3(&self, src: &Self::Handle, dst: &mut Self::Handle,
                            matrix: &[f32; 9]) -> ComputeResult<()> {
        trace!(backend = self.name(), "exec_color_matrix3x3");
        if matrix.iter().any(|m| !m.is_finite()) {
            return Err(ComputeError::InvalidParameter("non-finite color matrix entry".into()));
        }
        let (w, _) = self.check_pair(src, dst)?;
        let row_len = w * C;

        self.for_each_row(&mut dst.data, row_len, |y, row| {
            let start = y * row_len;
            kernels::color_matrix_row(&src.data[start..start + row_len], matrix, row);
        });

        Ok(())
    }

    fn limits(&self) -> &BackendLimits {
        &self.limits
    }

    fn name(&self) -> &'static str {
        if self.parallel { "CPU" } else { "Scalar" }
    }
}

/// Single-threaded backend running the same kernels in row order.
pub struct ScalarPrimitives {
    inner: CpuPrimitives,
}

impl ScalarPrimitives {
    pub fn new() -> Self {
        Self {
            inner: CpuPrimitives::with_parallel(false),
        }
    }
}

impl Default for ScalarPrimitives {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterPrimitives for ScalarPrimitives {
    type Handle = CpuImage;

    fn allocate(&self, width: u32, height: u32) -> ComputeResult<Self::Handle> {
        self.inner.allocate(width, height)
    }

    fn upload(&self, handle: &mut Self::Handle, data: &[u8]) -> ComputeResult<()> {
        self.inner.upload(handle, data)
    }

    fn download(&self, handle: &Self::Handle) -> ComputeResult<Vec<u8>> {
        self.inner.download(handle)
    }

    fn exec_blur(&self, src: &Self::Handle, dst: &mut Self::Handle, radius: f32) -> ComputeResult<()> {
        self.inner.exec_blur(src, dst, radius)
    }

    fn exec_convolve5x5(&self, src: &Self::Handle, dst: &mut Self::Handle,
                        coefficients: &[f32; 25]) -> ComputeResult<()> {
        self.inner.exec_convolve5x5(src, dst, coefficients)
    }

    fn exec_color_matrix3x3(&self, src: &Self::Handle, dst: &mut Self::Handle,
                            matrix: &[f32; 9]) -> ComputeResult<()> {
        self.inner.exec_color_matrix3x3(src, dst, matrix)
    }

    fn limits(&self) -> &BackendLimits {
        self.inner.limits()
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
