//! FilterSession behaviour: idempotence, resets and failure handling.

use std::sync::atomic::{AtomicU32, Ordering};

use slidefx_core::Image;
use slidefx_core::pattern::demo_image_sized;
use slidefx_ops::{
    Backend, DemoSource, FilterMode, FilterSession, FixedSource, OpsError, OpsResult, SliderPosition,
    SourceProvider, UiEvent,
};

/// Grows by one pixel in each direction on every load.
struct GrowingSource {
    loads: AtomicU32,
}

impl SourceProvider for GrowingSource {
    fn load(&self) -> OpsResult<Image> {
        let n = self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(demo_image_sized(8 + n, 6 + n))
    }
}

/// Succeeds once, then fails.
struct FlakySource {
    loads: AtomicU32,
}

impl SourceProvider for FlakySource {
    fn load(&self) -> OpsResult<Image> {
        match self.loads.fetch_add(1, Ordering::SeqCst) {
            0 => Ok(demo_image_sized(8, 8)),
            _ => Err(OpsError::Source("gone".into())),
        }
    }
}

fn demo_session(backend: Backend) -> FilterSession {
    FilterSession::new(Box::new(DemoSource::sized(40, 30)), backend).unwrap()
}

#[test]
fn test_repeat_is_bit_identical() {
    for mode in FilterMode::ALL {
        let mut s = demo_session(Backend::Cpu);
        s.select_mode(mode).unwrap();
        let first = s.set_slider(SliderPosition::new(63)).unwrap().clone();
        let second = s.set_slider(SliderPosition::new(63)).unwrap().clone();
        assert!(first == second, "{mode} not idempotent");
    }
}

#[test]
fn test_same_result_after_other_positions() {
    let mut s = demo_session(Backend::Cpu);
    s.select_mode(FilterMode::Convolve).unwrap();
    let a = s.set_slider(SliderPosition::new(20)).unwrap().clone();
    s.set_slider(SliderPosition::new(90)).unwrap();
    let b = s.set_slider(SliderPosition::new(20)).unwrap().clone();
    assert!(a == b);
}

#[test]
fn test_backends_agree_through_session() {
    let mut cpu = demo_session(Backend::Cpu);
    let mut scalar = demo_session(Backend::Scalar);
    for mode in FilterMode::ALL {
        cpu.select_mode(mode).unwrap();
        scalar.select_mode(mode).unwrap();
        for pos in [0, 37, 100] {
            let a = cpu.set_slider(SliderPosition::new(pos)).unwrap().clone();
            let b = scalar.set_slider(SliderPosition::new(pos)).unwrap();
            assert!(&a == b, "{mode} at {pos}");
        }
    }
}

#[test]
fn test_mode_switch_resets_slider_and_dimensions() {
    let provider = GrowingSource { loads: AtomicU32::new(0) };
    let mut s = FilterSession::new(Box::new(provider), Backend::Cpu).unwrap();
    assert_eq!(s.destination().dimensions(), (8, 6));

    s.set_slider(SliderPosition::new(80)).unwrap();
    s.handle(UiEvent::SelectMode(FilterMode::ColorMatrix)).unwrap();

    assert_eq!(s.slider(), SliderPosition::MIN);
    assert_eq!(s.source().dimensions(), (9, 7));
    assert_eq!(s.destination().dimensions(), (9, 7));
    assert!(s.showing_source());
    assert!(s.display() == s.source());

    // The recreated backend fits the new size
    let out = s.set_slider(SliderPosition::new(30)).unwrap();
    assert_eq!(out.dimensions(), (9, 7));
}

#[test]
fn test_failed_invocation_keeps_display() {
    let mut s = demo_session(Backend::Cpu);
    let shown = s.set_slider(SliderPosition::new(40)).unwrap().clone();

    s.close();
    let err = s.set_slider(SliderPosition::new(70)).unwrap_err();
    assert!(err.is_backend_failure());
    assert!(s.display() == &shown);

    // A mode switch establishes a fresh backend session
    s.select_mode(FilterMode::Blur).unwrap();
    assert!(s.set_slider(SliderPosition::new(70)).is_ok());
}

#[test]
fn test_failed_invocation_keeps_slider() {
    let mut s = demo_session(Backend::Cpu);
    s.set_slider(SliderPosition::new(10)).unwrap();
    let shown = s.display().clone();

    s.close();
    assert!(s.set_slider(SliderPosition::new(90)).is_err());
    assert_eq!(s.slider(), SliderPosition::new(10));
    assert_eq!(s.parameter(), slidefx_ops::map(FilterMode::Blur, SliderPosition::new(10)));
    assert!(s.display() == &shown);
}

#[test]
fn test_source_reload_failure_is_reported() {
    let provider = FlakySource { loads: AtomicU32::new(0) };
    let mut s = FilterSession::new(Box::new(provider), Backend::Cpu).unwrap();
    s.set_slider(SliderPosition::new(60)).unwrap();

    let err = s.select_mode(FilterMode::Convolve).unwrap_err();
    assert!(matches!(err, OpsError::Source(_)));
    assert_eq!(s.mode(), FilterMode::Blur);
    assert_eq!(s.slider(), SliderPosition::new(60));
    assert!(!s.showing_source());
}

#[test]
fn test_blur_at_zero_differs_from_source() {
    // Slider 0 still runs the filter with radius 1
    let img = demo_image_sized(16, 16);
    let mut s = FilterSession::new(Box::new(FixedSource::new(img.clone())), Backend::Cpu).unwrap();
    let out = s.set_slider(SliderPosition::MIN).unwrap();
    assert_eq!(out.dimensions(), img.dimensions());
    assert!(out != &img);
}

#[test]
fn test_set_source_resets() {
    let mut s = demo_session(Backend::Cpu);
    s.set_slider(SliderPosition::new(55)).unwrap();
    s.set_source(Box::new(FixedSource::new(Image::filled(5, 3, [1, 2, 3, 255])))).unwrap();
    assert_eq!(s.slider(), SliderPosition::MIN);
    assert_eq!(s.display().dimensions(), (5, 3));
    assert_eq!(s.source_description(), "image 5x3");
}
