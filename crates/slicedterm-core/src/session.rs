// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Session state: path, scrollback and timed effects.
// Author: Lukas Bower

//! Session state: path, scrollback and timed effects.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use log::debug;

use crate::interpreter::{EffectKind, EffectRequest, Execution, Interpreter, PathChange};
use crate::payload::{ChallengeDeck, ContentPayload, Detail, OutputRecord};
use crate::secret::RecordSink;

/// Path every session starts in.
pub const HOME_PATH: &str = "~";

/// An effect currently on screen.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ActiveEffect {
    /// Effect kind.
    pub kind: EffectKind,
    /// Time the effect was activated.
    pub since_ms: u64,
    /// Time the scheduled reset clears it.
    pub until_ms: u64,
}

/// Direction for browsing the challenge deck.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Step {
    /// Previous challenge.
    Back,
    /// Next challenge.
    Forward,
}

/// What applying an execution changed, for hosts that redraw incrementally.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Applied {
    /// Scrollback was emptied.
    pub cleared: bool,
    /// New current path, when it changed.
    pub path: Option<String>,
    /// Effect that was (re)activated.
    pub effect: Option<ActiveEffect>,
    /// A record was appended.
    pub appended: bool,
}

/// Mutable state of one terminal session.
#[derive(Clone, Debug)]
pub struct SessionState {
    scrollback: Vec<OutputRecord>,
    current_path: String,
    effect: Option<ActiveEffect>,
    deck: Option<ChallengeDeck>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Fresh session at `~` with empty scrollback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scrollback: Vec::new(),
            current_path: HOME_PATH.to_string(),
            effect: None,
            deck: None,
        }
    }

    /// Records in submission order.
    #[must_use]
    pub fn scrollback(&self) -> &[OutputRecord] {
        &self.scrollback
    }

    /// Current path, `~` or `~/<directory>`.
    #[must_use]
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Effect on screen, if any.
    #[must_use]
    pub fn effect(&self) -> Option<&ActiveEffect> {
        self.effect.as_ref()
    }

    /// Challenge deck most recently shown, if still in the scrollback.
    #[must_use]
    pub fn deck(&self) -> Option<&ChallengeDeck> {
        self.deck.as_ref()
    }

    /// Apply an interpreter result at time `now_ms`.
    pub fn apply(&mut self, execution: Execution, now_ms: u64) -> Applied {
        let Execution { record, delta } = execution;
        let mut applied = Applied::default();

        if delta.clear_scrollback {
            self.scrollback.clear();
            self.deck = None;
            applied.cleared = true;
        }

        let path = match delta.path {
            PathChange::Keep => None,
            PathChange::Home => Some(HOME_PATH.to_string()),
            PathChange::Enter(name) => Some(format!("{HOME_PATH}/{name}")),
        };
        if let Some(path) = path {
            if path != self.current_path {
                debug!("path {} -> {}", self.current_path, path);
                self.current_path.clone_from(&path);
                applied.path = Some(path);
            }
        }

        if let Some(request) = delta.effect {
            applied.effect = Some(self.activate(request, now_ms));
        }

        if let Some(record) = record {
            self.push_record(record);
            applied.appended = true;
        }
        applied
    }

    /// Execute `line` and apply the result. Blank lines are ignored.
    pub fn submit(
        &mut self,
        interpreter: &Interpreter<'_>,
        line: &str,
        now_ms: u64,
    ) -> Option<Applied> {
        if line.trim().is_empty() {
            return None;
        }
        Some(self.apply(interpreter.execute(line), now_ms))
    }

    /// Clear the effect if its deadline has passed. Returns true when cleared.
    pub fn expire_effect(&mut self, now_ms: u64) -> bool {
        match self.effect {
            Some(effect) if now_ms >= effect.until_ms => {
                debug!("effect {:?} expired at {now_ms}", effect.kind);
                self.effect = None;
                true
            }
            _ => false,
        }
    }

    /// Move through the challenge deck, wrapping at either end.
    pub fn browse(&mut self, step: Step) -> Option<ChallengeDeck> {
        let deck = self.deck?;
        let moved = match step {
            Step::Back => deck.previous(),
            Step::Forward => deck.next(),
        };
        self.deck = Some(moved);
        Some(moved)
    }

    fn activate(&mut self, request: EffectRequest, now_ms: u64) -> ActiveEffect {
        let effect = ActiveEffect {
            kind: request.kind,
            since_ms: now_ms,
            until_ms: now_ms.saturating_add(request.duration_ms),
        };
        self.effect = Some(effect);
        effect
    }
}

impl RecordSink for SessionState {
    fn push_record(&mut self, record: OutputRecord) {
        if let ContentPayload::Detail(Detail::Challenges(deck)) = record.payload() {
            self.deck = Some(*deck);
        }
        self.scrollback.push(record);
    }
}
