//! Backend sessions.
//!
//! A session owns the input and output allocations for one image size and
//! keeps them alive across filter invocations until [`BackendSession::destroy`]
//! is called (or the session is dropped). After destroy every `run` fails
//! with [`ComputeError::SessionDisposed`].

use slidefx_core::Image;
use tracing::{debug, trace};

use crate::backend::{
    select_best_backend, Backend, CpuPrimitives, FilterOp, FilterPrimitives, ScalarPrimitives,
};
use crate::{ComputeError, ComputeResult};

/// Allocations of one backend, sized for a single image.
pub struct BackendSession<G: FilterPrimitives> {
    gpu: G,
    input: Option<G::Handle>,
    output: Option<G::Handle>,
    width: u32,
    height: u32,
}

impl<G: FilterPrimitives> BackendSession<G> {
    /// Allocates input and output buffers for `width` x `height`.
    pub fn create(gpu: G, width: u32, height: u32) -> ComputeResult<Self> {
        gpu.limits().check(width, height)?;
        let input = gpu.allocate(width, height)?;
        let output = gpu.allocate(width, height)?;
        debug!(backend = gpu.name(), width, height, "backend session created");
        Ok(Self {
            gpu,
            input: Some(input),
            output: Some(output),
            width,
            height,
        })
    }

    /// Uploads `src`, runs `op` and returns the downloaded result.
    pub fn run(&mut self, src: &[u8], op: &FilterOp) -> ComputeResult<Vec<u8>> {
        let (Some(input), Some(output)) = (self.input.as_mut(), self.output.as_mut()) else {
            return Err(ComputeError::SessionDisposed);
        };
        trace!(op = op.name(), backend = self.gpu.name(), "session run");
        self.gpu.upload(input, src)?;
        op.execute(&self.gpu, input, output)?;
        self.gpu.download(output)
    }

    /// Whether the allocations are still held.
    pub fn is_active(&self) -> bool {
        self.input.is_some()
    }

    /// Releases the allocations. Idempotent.
    pub fn destroy(&mut self) {
        if self.input.take().is_some() {
            self.output = None;
            debug!(backend = self.gpu.name(), "backend session destroyed");
        }
    }

    /// Session image size.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Backend name.
    pub fn name(&self) -> &'static str {
        self.gpu.name()
    }
}

impl<G: FilterPrimitives> Drop for BackendSession<G> {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Session over any backend, chosen at runtime.
pub enum AnySession {
    Cpu(BackendSession<CpuPrimitives>),
    Scalar(BackendSession<ScalarPrimitives>),
}

impl AnySession {
    /// Runs `op` on raw RGBA8 data of the session size.
    pub fn run(&mut self, src: &[u8], op: &FilterOp) -> ComputeResult<Vec<u8>> {
        match self {
            Self::Cpu(s) => s.run(src, op),
            Self::Scalar(s) => s.run(src, op),
        }
    }

    /// Runs `op` on `src` and wraps the result in a new [`Image`].
    pub fn run_image(&mut self, src: &Image, op: &FilterOp) -> ComputeResult<Image> {
        let dims = self.dimensions();
        if src.dimensions() != dims {
            return Err(ComputeError::DimensionMismatch(dims, src.dimensions()));
        }
        let data = self.run(src.data(), op)?;
        Ok(Image::from_rgba8(dims.0, dims.1, data)?)
    }

    pub fn is_active(&self) -> bool {
        match self {
            Self::Cpu(s) => s.is_active(),
            Self::Scalar(s) => s.is_active(),
        }
    }

    pub fn destroy(&mut self) {
        match self {
            Self::Cpu(s) => s.destroy(),
            Self::Scalar(s) => s.destroy(),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Cpu(s) => s.dimensions(),
            Self::Scalar(s) => s.dimensions(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Cpu(s) => s.name(),
            Self::Scalar(s) => s.name(),
        }
    }

    /// Concrete backend kind of this session.
    pub fn backend(&self) -> Backend {
        match self {
            Self::Cpu(_) => Backend::Cpu,
            Self::Scalar(_) => Backend::Scalar,
        }
    }
}

/// Creates a session for `width` x `height` on `backend`.
///
/// `Backend::Auto` resolves through [`select_best_backend`].
pub fn create_session(backend: Backend, width: u32, height: u32) -> ComputeResult<AnySession> {
    if !backend.is_available() {
        return Err(ComputeError::BackendNotAvailable(backend.name().into()));
    }
    match backend {
        Backend::Cpu => Ok(AnySession::Cpu(BackendSession::create(CpuPrimitives::new(), width, height)?)),
        Backend::Scalar => Ok(AnySession::Scalar(BackendSession::create(ScalarPrimitives::new(), width, height)?)),
        Backend::Auto => create_session(select_best_backend(), width, height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destroy_disposes() {
        let mut s = create_session(Backend::Cpu, 4, 4).unwrap();
        assert!(s.is_active());
        s.destroy();
        s.destroy();
        assert!(!s.is_active());
        let err = s.run(&[0; 64], &FilterOp::Blur { radius: 1.0 }).unwrap_err();
        assert!(matches!(err, ComputeError::SessionDisposed));
    }

    #[test]
    fn test_auto_resolves() {
        let s = create_session(Backend::Auto, 2, 2).unwrap();
        assert_ne!(s.backend(), Backend::Auto);
        assert_eq!(s.dimensions(), (2, 2));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            create_session(Backend::Scalar, 0, 3),
            Err(ComputeError::InvalidDimensions(0, 3))
        ));
    }

    #[test]
    fn test_run_image_checks_size() {
        let mut s = create_session(Backend::Scalar, 4, 4).unwrap();
        let img = Image::new(3, 4);
        assert!(matches!(
            s.run_image(&img, &FilterOp::Blur { radius: 2.0 }),
            Err(ComputeError::DimensionMismatch((4, 4), (3, 4)))
        ));
    }

    #[test]
    fn test_session_reused_across_runs() {
        let mut s = create_session(Backend::Cpu, 2, 1).unwrap();
        let src = vec![10, 20, 30, 255, 40, 50, 60, 255];
        let swap = FilterOp::ColorMatrix3x3 { matrix: [0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0] };
        let a = s.run(&src, &swap).unwrap();
        let b = s.run(&a, &swap).unwrap();
        assert_eq!(a, vec![30, 20, 10, 255, 60, 50, 40, 255]);
        assert_eq!(b, src);
    }
}
