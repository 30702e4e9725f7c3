//! Sweep command - render evenly spaced slider positions.

use anyhow::{Context, Result};
use slidefx_ops::{Backend, FilterMode, SliderPosition, map};
use std::path::{Path, PathBuf};
use tracing::{info, trace};

use super::{open_session, save_image};
use crate::SweepArgs;

pub fn run(args: SweepArgs, backend: Backend, verbose: u8) -> Result<()> {
    trace!(input = ?args.input, mode = %args.mode, steps = args.steps, "sweep::run");

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create directory: {}", args.output.display()))?;

    let mut session = open_session(args.input.as_deref(), backend, args.mode)?;
    let positions = sweep_positions(args.steps);
    info!(mode = %args.mode, count = positions.len(), backend = session.backend_name(), "sweeping slider");

    for pos in positions {
        let slider = SliderPosition::from(pos);
        let out = session
            .set_slider(slider)
            .with_context(|| format!("{} filter failed at slider {}", args.mode, pos))?;
        let path = frame_path(&args.output, args.mode, pos);
        save_image(&path, out)?;

        if verbose > 0 {
            println!("{} (parameter {:.4})", path.display(), map(args.mode, slider));
        }
    }

    Ok(())
}

/// `steps` slider positions spread evenly over 0..=100, ends included.
pub fn sweep_positions(steps: u32) -> Vec<u8> {
    match steps {
        0 => Vec::new(),
        1 => vec![0],
        n => {
            let last = (n - 1) as f64;
            let mut out: Vec<u8> = (0..n)
                .map(|i| (i as f64 * 100.0 / last).round() as u8)
                .collect();
            out.dedup();
            out
        }
    }
}

fn frame_path(dir: &Path, mode: FilterMode, pos: u8) -> PathBuf {
    dir.join(format!("{}_{:03}.png", mode.name(), pos))
}
