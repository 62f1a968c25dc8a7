// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Non-interactive script runner driving a terminal on a logical clock.
// Author: Lukas Bower

//! Non-interactive script runner driving a terminal on a logical clock.
//!
//! Scripts hold one command per line. `#` starts a comment. Lines beginning
//! with `@` are directives:
//!
//! - `@key <name>...` feeds raw key identifiers (`@key ArrowUp ArrowUp`)
//! - `@wait <ms>` advances the clock and fires due timers
//! - `@next` / `@prev` browse the challenge deck

use std::io::{self, BufRead, Write};

use log::debug;
use slicedterm_core::Step;
use thiserror::Error;

use crate::driver::{Frame, Terminal, TerminalEvent};
use crate::render::Renderer;

/// Errors raised while reading or running a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Reading the script or writing output failed.
    #[error("script i/o failed: {0}")]
    Io(#[from] io::Error),
    /// A directive was malformed.
    #[error("line {line}: {message}")]
    InvalidDirective {
        /// One-based line number.
        line: usize,
        /// What was wrong.
        message: String,
    },
}

/// One step of a script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptOp {
    /// Submit a command line.
    Submit(String),
    /// Feed raw key identifiers.
    Keys(Vec<String>),
    /// Advance the clock.
    Wait(u64),
    /// Browse the challenge deck.
    Browse(Step),
}

/// Parse a script into operations.
pub fn parse_script<R: BufRead>(reader: R) -> Result<Vec<ScriptOp>, ScriptError> {
    let mut ops = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = strip_comment(&line).trim();
        if line.is_empty() {
            continue;
        }
        let Some(directive) = line.strip_prefix('@') else {
            ops.push(ScriptOp::Submit(line.to_owned()));
            continue;
        };
        ops.push(parse_directive(idx + 1, directive)?);
    }
    Ok(ops)
}

fn strip_comment(line: &str) -> &str {
    if line.trim_start().starts_with('#') {
        return "";
    }
    match line.find(" #") {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_directive(line: usize, directive: &str) -> Result<ScriptOp, ScriptError> {
    let invalid = |message: String| ScriptError::InvalidDirective { line, message };
    let mut parts = directive.split_whitespace();
    match parts.next() {
        Some("key") => {
            let keys: Vec<String> = parts.map(str::to_owned).collect();
            if keys.is_empty() {
                return Err(invalid("@key requires at least one key".to_owned()));
            }
            Ok(ScriptOp::Keys(keys))
        }
        Some("wait") => {
            let raw = parts
                .next()
                .ok_or_else(|| invalid("@wait requires milliseconds".to_owned()))?;
            raw.parse::<u64>()
                .map(ScriptOp::Wait)
                .map_err(|_| invalid(format!("invalid @wait value '{raw}'")))
        }
        Some("next") => Ok(ScriptOp::Browse(Step::Forward)),
        Some("prev") => Ok(ScriptOp::Browse(Step::Back)),
        Some(other) => Err(invalid(format!("unknown directive @{other}"))),
        None => Err(invalid("empty directive".to_owned())),
    }
}

/// Run `ops` against `terminal`, writing rendered output to `writer`.
///
/// The logical clock starts at zero and only moves on `@wait`. The terminal
/// is shut down afterwards, canceling any pending timers.
pub fn run_script<W: Write>(
    terminal: &mut Terminal,
    ops: &[ScriptOp],
    renderer: &Renderer,
    writer: &mut W,
) -> Result<(), ScriptError> {
    let mut now_ms = 0u64;
    let frames = terminal.start(now_ms);
    write_frames(renderer, writer, &frames)?;
    for op in ops {
        debug!("script op {op:?} at {now_ms} ms");
        let frames = match op {
            ScriptOp::Submit(line) => terminal.handle(TerminalEvent::Submit(line.clone()), now_ms),
            ScriptOp::Keys(keys) => {
                let mut frames = Vec::new();
                for key in keys {
                    frames.extend(terminal.handle(TerminalEvent::Key(key.clone()), now_ms));
                }
                frames
            }
            ScriptOp::Wait(ms) => {
                now_ms = now_ms.saturating_add(*ms);
                terminal.advance(now_ms)
            }
            ScriptOp::Browse(step) => terminal.handle(TerminalEvent::Browse(*step), now_ms),
        };
        write_frames(renderer, writer, &frames)?;
    }
    terminal.shutdown();
    writer.flush()?;
    Ok(())
}

/// Write the start-up banner ahead of a scripted run.
pub fn write_banner<W: Write>(renderer: &Renderer, writer: &mut W) -> Result<(), ScriptError> {
    for line in renderer.banner() {
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

fn write_frames<W: Write>(
    renderer: &Renderer,
    writer: &mut W,
    frames: &[Frame],
) -> Result<(), ScriptError> {
    for frame in frames {
        let lines = match frame {
            Frame::Record { path, record } => renderer.record(path, record),
            Frame::Cleared => vec!["[cleared]".to_owned()],
            Frame::OverlayShown(_) => vec!["[overlay shown]".to_owned()],
            Frame::OverlayHidden => vec!["[overlay hidden]".to_owned()],
            Frame::Challenge(deck) => renderer.challenge(deck),
            Frame::Path(_) | Frame::Cursor(_) => Vec::new(),
        };
        for line in lines {
            writeln!(writer, "{line}")?;
        }
    }
    Ok(())
}
