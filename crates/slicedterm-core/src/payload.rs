// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Rendering-agnostic payloads and output records.
// Author: Lukas Bower

//! Rendering-agnostic payloads and output records.
//!
//! Payloads carry structured data only. Turning them into glyphs and colours
//! is left to whichever host displays the scrollback.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::TerminalError;
use crate::namespace::EntryKind;

/// Semantic tone hint attached to styled text.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[allow(missing_docs)]
pub enum Tone {
    #[default]
    Normal,
    Accent,
    Highlight,
    Success,
    Alert,
}

/// Fixed text with a tone and an "animated" hint (drawn pulsing).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StyledText {
    /// Text, possibly spanning several lines.
    pub text: &'static str,
    /// Tone hint.
    pub tone: Tone,
    /// Whether the host should draw attention to the text.
    pub animated: bool,
}

/// One row of an `ls` listing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ListingEntry {
    /// Entry name.
    pub name: &'static str,
    /// Entry kind.
    pub kind: EntryKind,
}

/// A top-level entry in the tree render.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TreeBranch {
    /// Entry name.
    pub name: &'static str,
    /// Entry kind.
    pub kind: EntryKind,
    /// Child labels, empty for files.
    pub children: &'static [&'static str],
}

/// Two-level render of the namespace.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tree {
    /// Root label.
    pub root: &'static str,
    /// Entries in declared order.
    pub branches: Vec<TreeBranch>,
}

/// Role of a line in a flattened tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum TreeLineKind {
    Root,
    Directory,
    File,
    Child,
}

/// One flattened tree line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TreeLine {
    /// Nesting depth; children sit one level below their directory.
    pub depth: usize,
    /// Branch marker, empty for the root line.
    pub marker: &'static str,
    /// Label text.
    pub label: &'static str,
    /// Line role.
    pub kind: TreeLineKind,
}

impl TreeLine {
    /// Render the line without styling.
    #[must_use]
    pub fn to_plain(&self) -> String {
        let mut out = String::new();
        for _ in 0..self.depth {
            out.push_str("    ");
        }
        out.push_str(self.marker);
        out.push_str(self.label);
        out
    }
}

/// Marker drawn before directories.
pub const DIRECTORY_MARKER: &str = "├── ";
/// Marker drawn before files and child labels.
pub const LEAF_MARKER: &str = "└── ";

impl Tree {
    /// Flatten the tree: root line (optional), then each entry followed by its
    /// children, all in declared order.
    #[must_use]
    pub fn lines(&self, include_root: bool) -> Vec<TreeLine> {
        let mut lines = Vec::new();
        if include_root {
            lines.push(TreeLine {
                depth: 0,
                marker: "",
                label: self.root,
                kind: TreeLineKind::Root,
            });
        }
        for branch in &self.branches {
            match branch.kind {
                EntryKind::Directory => {
                    lines.push(TreeLine {
                        depth: 0,
                        marker: DIRECTORY_MARKER,
                        label: branch.name,
                        kind: TreeLineKind::Directory,
                    });
                    lines.extend(branch.children.iter().map(|child| TreeLine {
                        depth: 1,
                        marker: LEAF_MARKER,
                        label: child,
                        kind: TreeLineKind::Child,
                    }));
                }
                EntryKind::File => lines.push(TreeLine {
                    depth: 0,
                    marker: LEAF_MARKER,
                    label: branch.name,
                    kind: TreeLineKind::File,
                }),
            }
        }
        lines
    }
}

/// Project, service or blog card.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Card {
    /// Card title.
    pub title: &'static str,
    /// One-line description.
    pub summary: &'static str,
    /// Technology tags.
    pub tags: &'static [&'static str],
    /// Publication date, blog cards only.
    pub date: Option<&'static str>,
}

/// Labelled fact on a profile page.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Fact {
    /// Label such as `Founded`.
    pub label: &'static str,
    /// Value such as `2024`.
    pub value: &'static str,
}

/// Profile page shown for file topics.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Profile {
    /// Page heading.
    pub heading: &'static str,
    /// Optional prose paragraph.
    pub body: Option<&'static str>,
    /// Labelled facts.
    pub facts: &'static [Fact],
}

/// Challenge difficulty.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[allow(missing_docs)]
pub enum Difficulty {
    Easy,
    Medium,
}

impl Difficulty {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
        }
    }
}

/// A coding challenge.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Challenge {
    /// Challenge title.
    pub title: &'static str,
    /// Problem statement.
    pub description: &'static str,
    /// Difficulty rating.
    pub difficulty: Difficulty,
}

/// Carousel of coding challenges with a current position.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChallengeDeck {
    /// Every challenge in order.
    pub challenges: &'static [Challenge],
    /// Index of the challenge on display.
    pub current: usize,
}

impl ChallengeDeck {
    /// Challenge on display, `None` for an empty deck.
    #[must_use]
    pub fn current(&self) -> Option<&'static Challenge> {
        self.challenges.get(self.current)
    }

    /// Advance one challenge, wrapping to the first after the last.
    #[must_use]
    pub fn next(self) -> Self {
        let len = self.challenges.len();
        if len == 0 {
            return self;
        }
        Self {
            current: (self.current + 1) % len,
            ..self
        }
    }

    /// Step back one challenge, wrapping to the last before the first.
    #[must_use]
    pub fn previous(self) -> Self {
        let len = self.challenges.len();
        if len == 0 {
            return self;
        }
        let current = if self.current == 0 {
            len - 1
        } else {
            self.current - 1
        };
        Self { current, ..self }
    }
}

/// Structured prose for a single topic.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "layout", rename_all = "lowercase"))]
#[allow(missing_docs)]
pub enum Detail {
    Cards { cards: &'static [Card] },
    Profile(Profile),
    Challenges(ChallengeDeck),
}

/// One-line summary of a help-listed command.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CommandSummary {
    /// Command token.
    pub name: &'static str,
    /// What the command does.
    pub description: &'static str,
}

/// Composite help payload.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HelpSheet {
    /// Heading above the command list.
    pub heading: &'static str,
    /// Help-listed commands in display order.
    pub commands: &'static [CommandSummary],
    /// Nudge towards the hidden commands.
    pub hint: &'static str,
    /// Heading above the tree.
    pub tree_heading: &'static str,
    /// Namespace structure.
    pub tree: Tree,
}

/// Tagged union of command outputs.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "data", rename_all = "snake_case"))]
#[allow(missing_docs)]
pub enum ContentPayload {
    Empty,
    Listing(Vec<ListingEntry>),
    Tree(Tree),
    Detail(Detail),
    Help(HelpSheet),
    PlainText(StyledText),
    ErrorText(String),
}

impl ContentPayload {
    /// Return true for `ErrorText` payloads.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::ErrorText(_))
    }
}

impl From<TerminalError> for ContentPayload {
    fn from(err: TerminalError) -> Self {
        use alloc::string::ToString;
        Self::ErrorText(err.to_string())
    }
}

/// One scrollback entry: the submitted text and what it produced.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OutputRecord {
    input: String,
    payload: ContentPayload,
    is_error: bool,
}

impl OutputRecord {
    /// Build a record; the error flag follows the payload.
    #[must_use]
    pub fn new(input: impl Into<String>, payload: ContentPayload) -> Self {
        let is_error = payload.is_error();
        Self {
            input: input.into(),
            payload,
            is_error,
        }
    }

    /// Text as it was submitted.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Output payload.
    #[must_use]
    pub fn payload(&self) -> &ContentPayload {
        &self.payload
    }

    /// Whether the record describes a failed command.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.is_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECK: &[Challenge] = &[
        Challenge {
            title: "a",
            description: "",
            difficulty: Difficulty::Easy,
        },
        Challenge {
            title: "b",
            description: "",
            difficulty: Difficulty::Medium,
        },
    ];

    #[test]
    fn deck_wraps_both_ways() {
        let deck = ChallengeDeck {
            challenges: DECK,
            current: 0,
        };
        assert_eq!(deck.previous().current, 1);
        assert_eq!(deck.next().next().current, 0);
    }

    #[test]
    fn empty_deck_stays_put() {
        let deck = ChallengeDeck {
            challenges: &[],
            current: 0,
        };
        assert_eq!(deck.next(), deck);
        assert!(deck.current().is_none());
    }

    #[test]
    fn error_flag_follows_payload() {
        let record = OutputRecord::new("cd nope", ContentPayload::ErrorText("x".into()));
        assert!(record.is_error());
        let record = OutputRecord::new("cd", ContentPayload::Empty);
        assert!(!record.is_error());
    }
}
