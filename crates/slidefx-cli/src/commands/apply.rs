//! Apply command - one filter at one slider position.

use anyhow::{Context, Result};
use slidefx_ops::{Backend, SliderPosition, map};
use tracing::{info, trace};

use super::{open_session, save_image};
use crate::ApplyArgs;

pub fn run(args: ApplyArgs, backend: Backend, verbose: u8) -> Result<()> {
    trace!(input = ?args.input, mode = %args.mode, slider = args.slider, "apply::run");

    let mut session = open_session(args.input.as_deref(), backend, args.mode)?;
    let slider = SliderPosition::from(args.slider);
    let parameter = map(args.mode, slider);

    info!(mode = %args.mode, slider = args.slider, parameter, backend = session.backend_name(), "applying filter");

    let out = session
        .set_slider(slider)
        .with_context(|| format!("{} filter failed at slider {}", args.mode, args.slider))?;
    save_image(&args.output, out)?;

    if verbose > 0 {
        println!(
            "{} {} -> {} (slider {}, parameter {:.4}, {})",
            args.mode,
            session.source_description(),
            args.output.display(),
            args.slider,
            parameter,
            session.backend_name()
        );
    }

    Ok(())
}
