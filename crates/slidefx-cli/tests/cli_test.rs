//! End-to-end tests of the `slidefx` binary.

use std::process::Command;

fn slidefx() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_slidefx"));
    cmd.env_remove("RUST_LOG").env("SLIDEFX_BACKEND", "cpu");
    cmd
}

#[test]
fn apply_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("blur.png");
    let status = slidefx()
        .args(["apply", "-m", "blur", "-s", "30", "-o"])
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    let img = slidefx_io::read(&out).unwrap();
    assert_eq!(img.dimensions(), (slidefx_core::pattern::DEMO_WIDTH, slidefx_core::pattern::DEMO_HEIGHT));
}

#[test]
fn apply_rejects_out_of_range_slider() {
    let dir = tempfile::tempdir().unwrap();
    let status = slidefx()
        .args(["apply", "-s", "101", "-o"])
        .arg(dir.path().join("x.png"))
        .status()
        .unwrap();
    assert!(!status.success());
}

#[test]
fn sweep_writes_frames() {
    let dir = tempfile::tempdir().unwrap();
    let status = slidefx()
        .args(["sweep", "-m", "convolve", "--steps", "3", "-o"])
        .arg(dir.path())
        .status()
        .unwrap();
    assert!(status.success());
    for pos in ["000", "050", "100"] {
        assert!(dir.path().join(format!("convolve_{pos}.png")).exists());
    }
}

#[test]
fn replay_saves_display() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src.png");
    slidefx_io::write(&src, &slidefx_core::pattern::demo_image_sized(32, 24)).unwrap();

    let before = dir.path().join("before.png");
    let after = dir.path().join("after.png");
    let script = dir.path().join("script.txt");
    std::fs::write(
        &script,
        format!("mode colormatrix\nsave {}\nslider 80\nsave {}\n", before.display(), after.display()),
    )
    .unwrap();

    let status = slidefx().arg("replay").arg(&script).arg(&src).status().unwrap();
    assert!(status.success());

    // Right after a mode switch the source is on display
    assert!(slidefx_io::read(&before).unwrap() == slidefx_io::read(&src).unwrap());
    assert!(slidefx_io::read(&after).unwrap() != slidefx_io::read(&src).unwrap());
}

#[test]
fn replay_reports_bad_line() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("bad.txt");
    std::fs::write(&script, "mode blur\nwobble 3\n").unwrap();

    let output = slidefx().arg("replay").arg(&script).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("line 2"));
}

#[test]
fn backends_lists_cpu() {
    let output = slidefx().arg("backends").output().unwrap();
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("CPU"));
    assert!(text.contains("selected: cpu"));
}
