// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Command interpreter mapping input lines to output records and state deltas.
// Author: Lukas Bower

//! Command interpreter mapping input lines to output records and state deltas.
//!
//! Dispatch walks an ordered route table and the first matching route wins.
//! Hidden commands sit at the top of the table so they shadow any standard
//! command with the same token. Every handler is total: unknown commands and
//! topics come back as `ErrorText` payloads.

use alloc::string::ToString;

use log::debug;

use crate::command::CommandLine;
use crate::content::{self, resolve_directory, resolve_file, ContentProvider};
use crate::error::TerminalError;
use crate::help::help_sheet;
use crate::namespace::{EntryKind, Namespace};
use crate::payload::{ContentPayload, OutputRecord, StyledText};
use crate::verb::Verb;

/// Default lifetime of the `matrix` overlay.
pub const DEFAULT_OVERLAY_MS: u64 = 5_000;

/// Change to the current path requested by a command.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PathChange {
    /// Leave the path alone.
    #[default]
    Keep,
    /// Return to `~`.
    Home,
    /// Enter `~/<name>`.
    Enter(&'static str),
}

/// Transient visual effects.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EffectKind {
    /// Full-screen matrix message.
    MatrixOverlay,
}

impl EffectKind {
    /// Text shown while the effect is active.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::MatrixOverlay => content::MATRIX.text,
        }
    }
}

/// Request to show an effect for a fixed duration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EffectRequest {
    /// Effect to show.
    pub kind: EffectKind,
    /// Time until the scheduled reset clears it.
    pub duration_ms: u64,
}

/// Session changes produced by one command.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StateDelta {
    /// Path update.
    pub path: PathChange,
    /// Drop every scrollback record before appending anything.
    pub clear_scrollback: bool,
    /// Effect to activate.
    pub effect: Option<EffectRequest>,
}

/// Result of executing one line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Execution {
    /// Record to append; `None` for `clear` and blank input.
    pub record: Option<OutputRecord>,
    /// Session changes.
    pub delta: StateDelta,
}

impl Execution {
    fn output(line: &CommandLine<'_>, payload: ContentPayload) -> Self {
        Self {
            record: Some(OutputRecord::new(line.raw(), payload)),
            delta: StateDelta::default(),
        }
    }

    fn with_path(mut self, path: PathChange) -> Self {
        self.delta.path = path;
        self
    }
}

type Handler = fn(&Interpreter<'_>, &CommandLine<'_>) -> Execution;

struct Route {
    verb: Verb,
    handler: Handler,
}

const ROUTES: &[Route] = &[
    Route {
        verb: Verb::Matrix,
        handler: matrix,
    },
    Route {
        verb: Verb::Coffee,
        handler: coffee,
    },
    Route {
        verb: Verb::Hack,
        handler: hack,
    },
    Route {
        verb: Verb::Ls,
        handler: list,
    },
    Route {
        verb: Verb::Tree,
        handler: tree,
    },
    Route {
        verb: Verb::Cd,
        handler: change_directory,
    },
    Route {
        verb: Verb::Help,
        handler: help,
    },
    Route {
        verb: Verb::Clear,
        handler: clear,
    },
];

/// Stateless interpreter over a namespace and a content provider.
#[derive(Clone, Copy)]
pub struct Interpreter<'a> {
    namespace: &'a Namespace,
    content: &'a dyn ContentProvider,
    overlay_ms: u64,
}

impl<'a> Interpreter<'a> {
    /// Create an interpreter with the default overlay duration.
    #[must_use]
    pub fn new(namespace: &'a Namespace, content: &'a dyn ContentProvider) -> Self {
        Self {
            namespace,
            content,
            overlay_ms: DEFAULT_OVERLAY_MS,
        }
    }

    /// Override how long the `matrix` overlay stays up.
    #[must_use]
    pub fn with_overlay_duration(mut self, overlay_ms: u64) -> Self {
        self.overlay_ms = overlay_ms;
        self
    }

    /// Namespace consulted by `ls`, `tree`, `cd` and `help`.
    #[must_use]
    pub fn namespace(&self) -> &'a Namespace {
        self.namespace
    }

    /// Execute one input line. Blank input yields an empty execution.
    #[must_use]
    pub fn execute(&self, line: &str) -> Execution {
        let parsed = match CommandLine::parse(line) {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!("ignoring submission: {err}");
                return Execution::default();
            }
        };
        match ROUTES
            .iter()
            .find(|route| route.verb.token() == parsed.command())
        {
            Some(route) => {
                debug!(
                    "dispatch {} with {} argument(s)",
                    route.verb.token(),
                    parsed.args().len()
                );
                (route.handler)(self, &parsed)
            }
            None => {
                debug!("unknown command {}", parsed.command());
                let err = TerminalError::UnknownCommand(parsed.command().to_string());
                Execution::output(&parsed, err.into())
            }
        }
    }
}

fn easter_egg(line: &CommandLine<'_>, text: StyledText) -> Execution {
    Execution::output(line, ContentPayload::PlainText(text))
}

fn matrix(interp: &Interpreter<'_>, line: &CommandLine<'_>) -> Execution {
    let mut execution = easter_egg(line, content::MATRIX);
    execution.delta.effect = Some(EffectRequest {
        kind: EffectKind::MatrixOverlay,
        duration_ms: interp.overlay_ms,
    });
    execution
}

fn coffee(_: &Interpreter<'_>, line: &CommandLine<'_>) -> Execution {
    easter_egg(line, content::COFFEE)
}

fn hack(_: &Interpreter<'_>, line: &CommandLine<'_>) -> Execution {
    easter_egg(line, content::HACK)
}

fn list(interp: &Interpreter<'_>, line: &CommandLine<'_>) -> Execution {
    Execution::output(line, ContentPayload::Listing(interp.namespace.listing()))
}

fn tree(interp: &Interpreter<'_>, line: &CommandLine<'_>) -> Execution {
    Execution::output(line, ContentPayload::Tree(interp.namespace.tree()))
}

fn change_directory(interp: &Interpreter<'_>, line: &CommandLine<'_>) -> Execution {
    let Some(name) = line.arg(0) else {
        return Execution::output(line, ContentPayload::Empty).with_path(PathChange::Home);
    };
    match interp.namespace.lookup(name) {
        Some(entry) if entry.kind() == EntryKind::Directory => Execution::output(
            line,
            resolve_directory(interp.content, entry.name()),
        )
        .with_path(PathChange::Enter(entry.name())),
        Some(entry) => Execution::output(line, resolve_file(interp.content, entry.name())),
        None => Execution::output(
            line,
            TerminalError::DirectoryNotFound(name.to_string()).into(),
        ),
    }
}

fn help(interp: &Interpreter<'_>, line: &CommandLine<'_>) -> Execution {
    Execution::output(line, ContentPayload::Help(help_sheet(interp.namespace)))
}

fn clear(_: &Interpreter<'_>, _: &CommandLine<'_>) -> Execution {
    Execution {
        record: None,
        delta: StateDelta {
            clear_scrollback: true,
            ..StateDelta::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::StudioContent;
    use crate::verb::ALL_VERBS;

    fn run(line: &str) -> Execution {
        let namespace = Namespace::studio();
        Interpreter::new(&namespace, &StudioContent).execute(line)
    }

    #[test]
    fn routes_cover_every_verb_in_priority_order() {
        let routed: alloc::vec::Vec<Verb> = ROUTES.iter().map(|r| r.verb).collect();
        assert_eq!(routed, ALL_VERBS);
    }

    #[test]
    fn blank_input_is_a_no_op() {
        assert_eq!(run("   "), Execution::default());
    }

    #[test]
    fn matrix_requests_the_overlay() {
        let execution = run("MATRIX");
        assert_eq!(
            execution.delta.effect,
            Some(EffectRequest {
                kind: EffectKind::MatrixOverlay,
                duration_ms: DEFAULT_OVERLAY_MS,
            })
        );
        let record = execution.record.unwrap();
        assert!(!record.is_error());
        assert_eq!(record.input(), "MATRIX");
    }

    #[test]
    fn overlay_duration_is_configurable() {
        let namespace = Namespace::studio();
        let execution = Interpreter::new(&namespace, &StudioContent)
            .with_overlay_duration(250)
            .execute("matrix");
        assert_eq!(execution.delta.effect.map(|e| e.duration_ms), Some(250));
    }

    #[test]
    fn cd_into_file_keeps_path() {
        let execution = run("cd about");
        assert_eq!(execution.delta.path, PathChange::Keep);
        assert!(!execution.record.unwrap().is_error());
    }

    #[test]
    fn clear_emits_no_record() {
        let execution = run("clear");
        assert!(execution.record.is_none());
        assert!(execution.delta.clear_scrollback);
    }

    #[test]
    fn unknown_command_uses_folded_token() {
        let record = run("SUDO make me a sandwich").record.unwrap();
        assert!(record.is_error());
        assert_eq!(
            record.payload(),
            &ContentPayload::ErrorText("Command not found: sudo".into())
        );
        assert_eq!(record.input(), "SUDO make me a sandwich");
    }
}
