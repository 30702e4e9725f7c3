//! Backend tests for slidefx-compute.

use slidefx_compute::{Backend, ComputeError, FilterOp, create_session, describe_backends};
use slidefx_core::Image;
use slidefx_core::pattern::demo_image_sized;

fn run(backend: Backend, img: &Image, op: &FilterOp) -> Image {
    let (w, h) = img.dimensions();
    let mut session = create_session(backend, w, h).unwrap();
    session.run_image(img, op).unwrap()
}

#[test]
fn test_cpu_backend_available() {
    assert!(Backend::Cpu.is_available());
    assert!(Backend::Scalar.is_available());
}

#[test]
fn test_describe_backends() {
    let desc = describe_backends();
    println!("{}", desc);
    assert!(desc.contains("[+] CPU"));
    assert!(desc.contains("Scalar"));
}

#[test]
fn test_backends_bit_identical() {
    let img = demo_image_sized(57, 41);
    let mut emboss = [0.0f32; 25];
    emboss[6] = -1.0;
    emboss[12] = 1.0;
    emboss[18] = 1.0;
    let ops = [
        FilterOp::Blur { radius: 1.0 },
        FilterOp::Blur { radius: 12.5 },
        FilterOp::Blur { radius: 25.0 },
        FilterOp::Convolve5x5 { coefficients: emboss },
        FilterOp::ColorMatrix3x3 { matrix: [0.9, 0.1, 0.0, 0.0, 0.8, 0.2, 0.3, 0.0, 0.7] },
    ];
    for op in &ops {
        let a = run(Backend::Cpu, &img, op);
        let b = run(Backend::Scalar, &img, op);
        assert!(a == b, "{} differs between backends", op.name());
    }
}

#[test]
fn test_deterministic() {
    let img = demo_image_sized(64, 48);
    let op = FilterOp::Blur { radius: 7.3 };
    assert!(run(Backend::Cpu, &img, &op) == run(Backend::Cpu, &img, &op));
}

#[test]
fn test_blur_preserves_flat_alpha() {
    let img = demo_image_sized(32, 32);
    let out = run(Backend::Cpu, &img, &FilterOp::Blur { radius: 25.0 });
    assert!(out.data().chunks_exact(4).all(|p| p[3] == 255));
}

#[test]
fn test_blur_smooths() {
    // Single white pixel on black spreads out and loses its peak
    let mut img = Image::filled(21, 21, [0, 0, 0, 255]);
    img.set_pixel(10, 10, [255, 255, 255, 255]).unwrap();
    let out = run(Backend::Cpu, &img, &FilterOp::Blur { radius: 3.0 });
    let center = out.pixel(10, 10).unwrap();
    let near = out.pixel(11, 10).unwrap();
    assert!(center[0] < 255);
    assert!(near[0] > 0);
    assert!(center[0] >= near[0]);
}

#[test]
fn test_color_matrix_identity() {
    let img = demo_image_sized(16, 8);
    let identity = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
    let out = run(Backend::Scalar, &img, &FilterOp::ColorMatrix3x3 { matrix: identity });
    assert!(out == img);
}

#[test]
fn test_color_matrix_clamps() {
    let img = Image::filled(2, 2, [200, 100, 50, 128]);
    let boost = [2.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0];
    let out = run(Backend::Cpu, &img, &FilterOp::ColorMatrix3x3 { matrix: boost });
    assert_eq!(out.pixel(1, 1).unwrap(), [255, 0, 50, 128]);
}

#[test]
fn test_invalid_radius_is_error() {
    let img = demo_image_sized(8, 8);
    let mut session = create_session(Backend::Cpu, 8, 8).unwrap();
    let err = session.run_image(&img, &FilterOp::Blur { radius: 26.0 }).unwrap_err();
    assert!(matches!(err, ComputeError::InvalidParameter(_)));
    // Session is still usable after a rejected call
    assert!(session.run_image(&img, &FilterOp::Blur { radius: 1.0 }).is_ok());
}
