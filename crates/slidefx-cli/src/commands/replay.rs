//! Replay command - drive a filter session from an event script.
//!
//! One event per line:
//!
//! ```text
//! # comment
//! mode convolve
//! slider 75
//! save emboss.png
//! ```
//!
//! `save` writes the image currently on display.

use anyhow::{Context, Result, bail};
use slidefx_ops::{Backend, FilterMode, FilterSession, SliderPosition, UiEvent};
use std::path::PathBuf;
use tracing::{debug, info, trace};

use super::{open_session, save_image};
use crate::ReplayArgs;

/// One script line.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Event(UiEvent),
    Save(PathBuf),
}

pub fn run(args: ReplayArgs, backend: Backend, verbose: u8) -> Result<()> {
    trace!(script = %args.script.display(), input = ?args.input, "replay::run");

    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script: {}", args.script.display()))?;
    let steps = parse_script(&text)
        .with_context(|| format!("Invalid script: {}", args.script.display()))?;
    info!(steps = steps.len(), "replaying script");

    let mut session = open_session(args.input.as_deref(), backend, FilterMode::default())?;
    for (line, step) in &steps {
        execute(&mut session, step, verbose).with_context(|| format!("line {line}"))?;
    }

    Ok(())
}

fn execute(session: &mut FilterSession, step: &Step, verbose: u8) -> Result<()> {
    match step {
        Step::Event(event) => {
            debug!(?event, "replay event");
            session.handle(*event)?;
            if verbose > 0 {
                println!("{:<12} slider {:>3}  parameter {:.4}", session.mode(), session.slider(), session.parameter());
            }
        }
        Step::Save(path) => {
            save_image(path, session.display())?;
            if verbose > 0 {
                let shown = if session.showing_source() { "source" } else { "filtered" };
                println!("saved {} ({shown})", path.display());
            }
        }
    }
    Ok(())
}

/// Parses a script into `(line number, step)` pairs. Line numbers start at 1.
pub fn parse_script(text: &str) -> Result<Vec<(usize, Step)>> {
    let mut steps = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = strip_comment(raw).trim();
        if content.is_empty() {
            continue;
        }
        let (cmd, arg) = match content.split_once(char::is_whitespace) {
            Some((c, a)) => (c, a.trim()),
            None => (content, ""),
        };
        let step = parse_step(cmd, arg).with_context(|| format!("line {line}: '{content}'"))?;
        steps.push((line, step));
    }
    Ok(steps)
}

/// Cuts a `#` comment that starts the line or follows whitespace.
/// A `#` inside a word (`out#1.png`) is kept.
fn strip_comment(line: &str) -> &str {
    let mut prev_blank = true;
    for (i, c) in line.char_indices() {
        if c == '#' && prev_blank {
            return &line[..i];
        }
        prev_blank = c.is_whitespace();
    }
    line
}

fn parse_step(cmd: &str, arg: &str) -> Result<Step> {
    if arg.is_empty() {
        bail!("'{cmd}' needs an argument");
    }
    match cmd.to_ascii_lowercase().as_str() {
        "mode" => {
            let mode: FilterMode = arg.parse()?;
            Ok(Step::Event(UiEvent::SelectMode(mode)))
        }
        "slider" => {
            let value: i64 = arg.parse().with_context(|| format!("not an integer: {arg}"))?;
            Ok(Step::Event(UiEvent::SliderMoved(SliderPosition::new(value))))
        }
        "save" => Ok(Step::Save(PathBuf::from(arg))),
        other => bail!("unknown command '{other}'"),
    }
}
