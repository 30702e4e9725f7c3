//! Filter session: the state behind the mode selector and the slider.
//!
//! A [`FilterSession`] owns everything one interactive session needs: the
//! active mode, the slider position, the source/destination images, the
//! image on display and the backend session. UI front ends feed it
//! [`UiEvent`]s and read back [`FilterSession::display`].
//!
//! # Lifecycle
//!
//! ```text
//! new()            load source, alloc destination, create backend, mode=Blur, slider=0
//!   |
//!   +-- SliderMoved -> map -> build request -> apply -> destination -> display
//!   |
//!   +-- SelectMode  -> slider=0, reload source, realloc destination,
//!   |                  recreate backend, display=source
//!   |
//! close()/drop     release backend
//! ```

use slidefx_compute::{AnySession, Backend, create_session};
use slidefx_core::Image;
use slidefx_core::pattern::{DEMO_HEIGHT, DEMO_WIDTH, demo_image_sized};
use tracing::{debug, info, warn};

use crate::dispatch::{FilterRequest, apply};
use crate::mapper::{FilterMode, SliderPosition, map};
use crate::{OpsError, OpsResult};

/// Supplies the source image on startup and on every reset.
pub trait SourceProvider: Send {
    /// Loads the source image.
    fn load(&self) -> OpsResult<Image>;

    /// Short description for logs and window titles.
    fn describe(&self) -> String {
        "source".to_string()
    }
}

/// In-memory source image.
pub struct FixedSource {
    image: Image,
}

impl FixedSource {
    pub fn new(image: Image) -> Self {
        Self { image }
    }
}

impl SourceProvider for FixedSource {
    fn load(&self) -> OpsResult<Image> {
        if self.image.is_empty() {
            return Err(OpsError::Source("empty image".into()));
        }
        Ok(self.image.clone())
    }

    fn describe(&self) -> String {
        format!("image {}x{}", self.image.width(), self.image.height())
    }
}

/// Built-in demo pattern.
pub struct DemoSource {
    width: u32,
    height: u32,
}

impl DemoSource {
    pub fn new() -> Self {
        Self::sized(DEMO_WIDTH, DEMO_HEIGHT)
    }

    pub fn sized(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceProvider for DemoSource {
    fn load(&self) -> OpsResult<Image> {
        if self.width == 0 || self.height == 0 {
            return Err(OpsError::Source(format!("invalid demo size {}x{}", self.width, self.height)));
        }
        Ok(demo_image_sized(self.width, self.height))
    }

    fn describe(&self) -> String {
        "demo pattern".to_string()
    }
}

/// Abstract UI input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Mode selector changed.
    SelectMode(FilterMode),
    /// Slider moved to a new position.
    SliderMoved(SliderPosition),
}

/// Session settings.
///
/// # Example
///
/// ```ignore
/// let session = SessionConfig::new()
///     .backend(Backend::Cpu)
///     .mode(FilterMode::ColorMatrix)
///     .build(Box::new(DemoSource::new()))?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    backend: Backend,
    mode: FilterMode,
}

impl SessionConfig {
    /// Creates config with defaults (auto backend, blur).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets compute backend.
    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Sets the mode active after startup.
    pub fn mode(mut self, mode: FilterMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builds a session loading its source from `provider`.
    pub fn build(self, provider: Box<dyn SourceProvider>) -> OpsResult<FilterSession> {
        FilterSession::with_config(provider, self)
    }
}

/// Which buffer is on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shown {
    Source,
    Destination,
}

/// Interactive filter session.
pub struct FilterSession {
    provider: Box<dyn SourceProvider>,
    backend_kind: Backend,
    backend: AnySession,
    mode: FilterMode,
    slider: SliderPosition,
    source: Image,
    destination: Image,
    shown: Shown,
}

impl FilterSession {
    /// Loads the source and establishes a backend session. Mode Blur, slider 0.
    pub fn new(provider: Box<dyn SourceProvider>, backend: Backend) -> OpsResult<Self> {
        SessionConfig::new().backend(backend).build(provider)
    }

    /// Creates a session from explicit settings.
    pub fn with_config(provider: Box<dyn SourceProvider>, config: SessionConfig) -> OpsResult<Self> {
        let source = provider.load()?;
        let (w, h) = source.dimensions();
        let backend = create_session(config.backend, w, h)?;
        info!(source = %provider.describe(), width = w, height = h, backend = backend.name(),
              "filter session started");
        Ok(Self {
            provider,
            backend_kind: config.backend,
            backend,
            mode: config.mode,
            slider: SliderPosition::MIN,
            source,
            destination: Image::new(w, h),
            shown: Shown::Source,
        })
    }

    /// Switches mode and resets the session.
    ///
    /// The slider goes back to 0, the source is reloaded, the destination is
    /// reallocated to the source size and the backend session is recreated.
    /// The source is displayed; no filter runs. If the reload fails the
    /// session is left as it was.
    pub fn select_mode(&mut self, mode: FilterMode) -> OpsResult<()> {
        debug!(from = %self.mode, to = %mode, "select mode");
        let source = self.provider.load()?;
        self.reset(source)?;
        self.mode = mode;
        Ok(())
    }

    /// Replaces the source provider and resets with the current mode.
    pub fn set_source(&mut self, provider: Box<dyn SourceProvider>) -> OpsResult<()> {
        let source = provider.load()?;
        self.reset(source)?;
        self.provider = provider;
        Ok(())
    }

    fn reset(&mut self, source: Image) -> OpsResult<()> {
        let (w, h) = source.dimensions();
        let backend = create_session(self.backend_kind, w, h)?;
        self.backend.destroy();
        self.backend = backend;

        self.slider = SliderPosition::MIN;
        self.source = source;
        self.destination = Image::new(w, h);
        self.shown = Shown::Source;
        debug!(width = w, height = h, backend = self.backend.name(), "session reset");
        Ok(())
    }

    /// Moves the slider and runs the active filter.
    ///
    /// On success the slider is updated and the destination is overwritten
    /// and displayed. On failure the slider, the parameter and the display
    /// all stay at the previous position and the error is returned.
    pub fn set_slider(&mut self, slider: SliderPosition) -> OpsResult<&Image> {
        let parameter = map(self.mode, slider);
        let request = FilterRequest::build(self.mode, parameter);

        match apply(&mut self.backend, &request, &self.source) {
            Ok(out) => {
                self.destination.copy_from(&out)?;
                self.slider = slider;
                self.shown = Shown::Destination;
                debug!(mode = %self.mode, slider = slider.get(), parameter, "filter applied");
                Ok(&self.destination)
            }
            Err(e) => {
                warn!(mode = %self.mode, slider = slider.get(), parameter, error = %e, "filter invocation failed");
                Err(e)
            }
        }
    }

    /// Dispatches one UI event synchronously.
    pub fn handle(&mut self, event: UiEvent) -> OpsResult<()> {
        match event {
            UiEvent::SelectMode(mode) => self.select_mode(mode),
            UiEvent::SliderMoved(pos) => self.set_slider(pos).map(|_| ()),
        }
    }

    /// Releases the backend session. Later invocations fail with a
    /// disposed-session error until the next mode switch.
    pub fn close(&mut self) {
        self.backend.destroy();
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn slider(&self) -> SliderPosition {
        self.slider
    }

    /// Parameter for the current mode and slider.
    pub fn parameter(&self) -> f32 {
        map(self.mode, self.slider)
    }

    pub fn source(&self) -> &Image {
        &self.source
    }

    pub fn destination(&self) -> &Image {
        &self.destination
    }

    /// Image currently on display.
    pub fn display(&self) -> &Image {
        match self.shown {
            Shown::Source => &self.source,
            Shown::Destination => &self.destination,
        }
    }

    /// Whether the display shows the unfiltered source.
    pub fn showing_source(&self) -> bool {
        self.shown == Shown::Source
    }

    /// Name of the backend in use.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Description of the source provider.
    pub fn source_description(&self) -> String {
        self.provider.describe()
    }
}

impl Drop for FilterSession {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> FilterSession {
        FilterSession::new(Box::new(DemoSource::sized(20, 12)), Backend::Cpu).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let s = session();
        assert_eq!(s.mode(), FilterMode::Blur);
        assert_eq!(s.slider(), SliderPosition::MIN);
        assert_eq!(s.parameter(), 1.0);
        assert!(s.showing_source());
        assert_eq!(s.destination().dimensions(), (20, 12));
    }

    #[test]
    fn test_slider_updates_display() {
        let mut s = session();
        s.set_slider(SliderPosition::new(50)).unwrap();
        assert!(!s.showing_source());
        assert!(s.display() == s.destination());
        assert_eq!(s.parameter(), 13.0);
    }

    #[test]
    fn test_handle_events() {
        let mut s = session();
        s.handle(UiEvent::SliderMoved(SliderPosition::new(10))).unwrap();
        s.handle(UiEvent::SelectMode(FilterMode::ColorMatrix)).unwrap();
        assert_eq!(s.mode(), FilterMode::ColorMatrix);
        assert_eq!(s.slider(), SliderPosition::MIN);
        assert!(s.showing_source());
    }

    #[test]
    fn test_empty_fixed_source_fails() {
        let res = FilterSession::new(Box::new(FixedSource::new(Image::new(0, 0))), Backend::Cpu);
        assert!(matches!(res, Err(OpsError::Source(_))));
    }

    #[test]
    fn test_config_builder() {
        let s = SessionConfig::new()
            .backend(Backend::Scalar)
            .mode(FilterMode::Convolve)
            .build(Box::new(DemoSource::sized(4, 4)))
            .unwrap();
        assert_eq!(s.mode(), FilterMode::Convolve);
        assert_eq!(s.backend_name(), "Scalar");
    }
}
