// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Command interpreter and session-state machine for the Sliced Labs terminal.
// Author: Lukas Bower
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![no_std]

//! Command interpreter and session-state machine for the Sliced Labs terminal.
//!
//! The crate is host-agnostic: it turns input lines and key identifiers into
//! structured output records and leaves drawing, timers and I/O to the caller.

extern crate alloc;

pub mod command;
pub mod content;
pub mod error;
pub mod help;
pub mod interpreter;
pub mod namespace;
pub mod payload;
pub mod secret;
pub mod session;
pub mod verb;

pub use command::{CommandLine, MAX_LINE_LEN};
pub use content::{resolve_directory, resolve_file, ContentProvider, StudioContent};
pub use error::TerminalError;
pub use interpreter::{
    EffectKind, EffectRequest, Execution, Interpreter, PathChange, StateDelta, DEFAULT_OVERLAY_MS,
};
pub use namespace::{EntryKind, Namespace, NamespaceEntry, STUDIO_ENTRIES};
pub use payload::{
    Card, Challenge, ChallengeDeck, CommandSummary, ContentPayload, Detail, Difficulty, Fact,
    HelpSheet, ListingEntry, OutputRecord, Profile, StyledText, Tone, Tree, TreeBranch, TreeLine,
    TreeLineKind,
};
pub use secret::{Detection, RecordSink, SecretDetector, SecretSequence, KONAMI_KEYS};
pub use session::{ActiveEffect, Applied, SessionState, Step, HOME_PATH};
pub use verb::{Verb, VerbSpec, ALL_VERBS, VERB_SPECS, VERB_SPEC_COUNT};
