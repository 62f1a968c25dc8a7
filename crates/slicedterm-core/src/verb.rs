// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Canonical command inventory for the studio terminal.
// Author: Lukas Bower

//! Canonical command inventory for the studio terminal.

/// Every command the interpreter understands.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verb {
    /// `matrix` (hidden)
    Matrix,
    /// `coffee` (hidden)
    Coffee,
    /// `hack` (hidden)
    Hack,
    /// `ls`
    Ls,
    /// `tree`
    Tree,
    /// `cd`
    Cd,
    /// `help`
    Help,
    /// `clear`
    Clear,
}

/// Number of commands known to the interpreter.
pub const VERB_SPEC_COUNT: usize = 8;

/// All commands in dispatch priority order: hidden commands first.
pub const ALL_VERBS: [Verb; VERB_SPEC_COUNT] = [
    Verb::Matrix,
    Verb::Coffee,
    Verb::Hack,
    Verb::Ls,
    Verb::Tree,
    Verb::Cd,
    Verb::Help,
    Verb::Clear,
];

/// Grammar metadata for a command.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VerbSpec {
    /// Command identifier.
    pub verb: Verb,
    /// Usage string.
    pub usage: &'static str,
    /// Example command line matching the usage.
    pub example: &'static str,
    /// Hidden commands stay out of `help`.
    pub hidden: bool,
}

/// Command grammar specs in dispatch priority order.
pub const VERB_SPECS: [VerbSpec; VERB_SPEC_COUNT] = [
    VerbSpec {
        verb: Verb::Matrix,
        usage: "matrix",
        example: "matrix",
        hidden: true,
    },
    VerbSpec {
        verb: Verb::Coffee,
        usage: "coffee",
        example: "coffee",
        hidden: true,
    },
    VerbSpec {
        verb: Verb::Hack,
        usage: "hack",
        example: "hack",
        hidden: true,
    },
    VerbSpec {
        verb: Verb::Ls,
        usage: "ls",
        example: "ls",
        hidden: false,
    },
    VerbSpec {
        verb: Verb::Tree,
        usage: "tree",
        example: "tree",
        hidden: false,
    },
    VerbSpec {
        verb: Verb::Cd,
        usage: "cd [topic]",
        example: "cd projects",
        hidden: false,
    },
    VerbSpec {
        verb: Verb::Help,
        usage: "help",
        example: "help",
        hidden: false,
    },
    VerbSpec {
        verb: Verb::Clear,
        usage: "clear",
        example: "clear",
        hidden: false,
    },
];

const _: [(); VERB_SPEC_COUNT] = [(); ALL_VERBS.len()];
const _: [(); VERB_SPEC_COUNT] = [(); VERB_SPECS.len()];

impl Verb {
    /// Canonical lower-case token.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Matrix => "matrix",
            Self::Coffee => "coffee",
            Self::Hack => "hack",
            Self::Ls => "ls",
            Self::Tree => "tree",
            Self::Cd => "cd",
            Self::Help => "help",
            Self::Clear => "clear",
        }
    }

    /// Whether the command is left out of the help sheet.
    #[must_use]
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Matrix | Self::Coffee | Self::Hack)
    }

    /// Parse a command token, matching case-insensitively.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        ALL_VERBS
            .iter()
            .copied()
            .find(|verb| token.eq_ignore_ascii_case(verb.token()))
    }
}
