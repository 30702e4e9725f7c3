//! Backends command - list compute backends.

use anyhow::Result;
use slidefx_compute::{Backend, describe_backends, select_best_backend};

pub fn run(selected: Backend) -> Result<()> {
    print!("{}", describe_backends());

    let resolved = match selected {
        Backend::Auto => select_best_backend(),
        other => other,
    };
    println!("selected: {resolved}");
    Ok(())
}
