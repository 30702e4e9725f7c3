//! View command - interactive slider viewer.

use anyhow::Result;
use slidefx_ops::Backend;

use crate::ViewArgs;

/// Run the view command.
pub fn run(args: ViewArgs, backend: Backend) -> Result<()> {
    let config = slidefx_view::ViewerConfig {
        mode: args.mode,
        backend,
    };

    let exit_code = slidefx_view::run_opt(args.input, config);

    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
