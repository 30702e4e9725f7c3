//! slidefx - slider-driven image filters from the command line
//!
//! Drives the same filter session as the viewer: pick a mode, move the
//! slider, look at (or save) the result.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use slidefx_ops::{Backend, FilterMode};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "slidefx")]
#[command(author, version, about = "Slider-driven blur, emboss and hue filters")]
#[command(long_about = "
Applies one of three filters to an image, controlled by a single slider
position (0..=100) and a filter mode.

Modes:
  blur         Gaussian blur, radius 1..25
  convolve     5x5 emboss kernel, blend factor 0..2
  colormatrix  luma-preserving hue rotation, -pi..pi

Without INPUT the built-in demo pattern is used.

Examples:
  slidefx apply photo.png -m blur -s 40 -o blurred.png
  slidefx sweep -m colormatrix --steps 11 -o frames/
  slidefx replay session.txt photo.png
  slidefx backends
  slidefx view photo.png
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Write log output to this file instead of stderr
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    /// Compute backend: auto, cpu, scalar
    #[arg(long, global = true, env = "SLIDEFX_BACKEND", default_value = "auto", value_parser = parse_backend)]
    backend: Backend,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply one filter at one slider position
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// Render evenly spaced slider positions to a directory
    Sweep(SweepArgs),

    /// Replay a script of UI events
    Replay(ReplayArgs),

    /// List compute backends
    Backends,

    /// Open the interactive viewer
    #[cfg(feature = "viewer")]
    #[command(visible_alias = "v")]
    View(ViewArgs),
}

#[derive(Args)]
struct ApplyArgs {
    /// Input PNG (default: demo pattern)
    input: Option<PathBuf>,

    /// Filter mode
    #[arg(short, long, default_value = "blur")]
    mode: FilterMode,

    /// Slider position 0..=100
    #[arg(short, long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
    slider: u8,

    /// Output PNG
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct SweepArgs {
    /// Input PNG (default: demo pattern)
    input: Option<PathBuf>,

    /// Filter mode
    #[arg(short, long, default_value = "blur")]
    mode: FilterMode,

    /// Number of slider positions (evenly spaced over 0..=100)
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=101))]
    steps: u32,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct ReplayArgs {
    /// Event script: `mode <name>`, `slider <0..100>`, `save <path>`
    script: PathBuf,

    /// Input PNG (default: demo pattern)
    input: Option<PathBuf>,
}

#[cfg(feature = "viewer")]
#[derive(Args)]
struct ViewArgs {
    /// Input PNG (default: last file, else demo pattern)
    input: Option<PathBuf>,

    /// Initial filter mode
    #[arg(short, long)]
    mode: Option<FilterMode>,
}

fn parse_backend(s: &str) -> Result<Backend, String> {
    Backend::from_name(s).ok_or_else(|| format!("unknown backend '{s}' (expected auto, cpu or scalar)"))
}

/// Installs the tracing subscriber. `RUST_LOG` overrides the level from `-v`.
fn init_logging(verbose: u8, log: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    match log {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            builder.with_writer(writer).with_ansi(false).init();
            Ok(Some(guard))
        }
        None => {
            builder.with_writer(std::io::stderr).init();
            Ok(None)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log.as_deref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Apply(args) => commands::apply::run(args, cli.backend, cli.verbose),
        Commands::Sweep(args) => commands::sweep::run(args, cli.backend, cli.verbose),
        Commands::Replay(args) => commands::replay::run(args, cli.backend, cli.verbose),
        Commands::Backends => commands::backends::run(cli.backend),
        #[cfg(feature = "viewer")]
        Commands::View(args) => commands::view::run(args, cli.backend),
    }
}
