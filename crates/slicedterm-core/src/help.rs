// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Help sheet content for the studio terminal.
// Author: Lukas Bower

//! Help sheet content for the studio terminal.

use crate::namespace::Namespace;
use crate::payload::{CommandSummary, HelpSheet};

/// Help-listed commands in display order.
pub const HELP_COMMANDS: &[CommandSummary] = &[
    CommandSummary {
        name: "ls",
        description: "List directories and files",
    },
    CommandSummary {
        name: "cd",
        description: "Change directory or open file",
    },
    CommandSummary {
        name: "tree",
        description: "Display directory structure",
    },
    CommandSummary {
        name: "clear",
        description: "Clear terminal",
    },
    CommandSummary {
        name: "help",
        description: "Show this help message",
    },
];

/// Heading above the command list.
pub const HELP_HEADING: &str = "Available Commands:";
/// Heading above the namespace tree.
pub const TREE_HEADING: &str = "Directory Structure:";
/// Nudge towards the hidden commands.
pub const HIDDEN_HINT: &str = "Try to find hidden easter eggs! 🎮";

/// Build the help sheet for a namespace.
#[must_use]
pub fn help_sheet(namespace: &Namespace) -> HelpSheet {
    HelpSheet {
        heading: HELP_HEADING,
        commands: HELP_COMMANDS,
        hint: HIDDEN_HINT,
        tree_heading: TREE_HEADING,
        tree: namespace.tree(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verb::{Verb, ALL_VERBS};

    #[test]
    fn help_lists_exactly_the_visible_verbs() {
        for verb in ALL_VERBS.iter() {
            let listed = HELP_COMMANDS.iter().any(|c| c.name == verb.token());
            assert_eq!(listed, !verb.is_hidden(), "{verb:?}");
        }
        assert_eq!(
            HELP_COMMANDS.len(),
            ALL_VERBS.iter().filter(|v| !v.is_hidden()).count()
        );
        assert!(Verb::from_token(HELP_COMMANDS[0].name).is_some());
    }
}
