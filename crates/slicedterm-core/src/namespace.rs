// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Static, read-only topic namespace for the studio terminal.
// Author: Lukas Bower

//! Static, read-only topic namespace for the studio terminal.
//!
//! The namespace is a fixed two-level structure: top-level entries and, for
//! directories, a flat list of child labels. Child labels are display-only and
//! never resolve back into the namespace, so no cycle handling is needed.

use alloc::vec::Vec;

use crate::error::TerminalError;
use crate::payload::{ListingEntry, Tree, TreeBranch};

/// Kind of a namespace entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EntryKind {
    /// Opened in place by `cd`; the current path does not change.
    File,
    /// Entered by `cd`; the current path becomes `~/<name>`.
    Directory,
}

/// A single topic in the namespace.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NamespaceEntry {
    name: &'static str,
    kind: EntryKind,
    children: &'static [&'static str],
}

impl NamespaceEntry {
    /// Declare a file entry.
    #[must_use]
    pub const fn file(name: &'static str) -> Self {
        Self {
            name,
            kind: EntryKind::File,
            children: &[],
        }
    }

    /// Declare a directory entry with its ordered child labels.
    #[must_use]
    pub const fn directory(name: &'static str, children: &'static [&'static str]) -> Self {
        Self {
            name,
            kind: EntryKind::Directory,
            children,
        }
    }

    /// Entry name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Entry kind.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Child labels in declared order; empty for files.
    #[must_use]
    pub const fn children(&self) -> &'static [&'static str] {
        self.children
    }

    /// Return true for directory entries.
    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Built-in studio topics in declaration order.
pub const STUDIO_ENTRIES: &[NamespaceEntry] = &[
    NamespaceEntry::file("about"),
    NamespaceEntry::directory("projects", &["web-apps", "mobile-apps", "blockchain"]),
    NamespaceEntry::directory("services", &["consulting", "development", "design"]),
    NamespaceEntry::file("contact"),
    NamespaceEntry::directory("blog", &["tech-insights", "case-studies", "tutorials"]),
    NamespaceEntry::directory("challenges", &["algorithms", "puzzles", "games"]),
];

/// Label printed on the first line of a tree render.
pub const TREE_ROOT: &str = ".";

/// Immutable namespace handle passed by reference into the interpreter.
#[derive(Clone, Copy, Debug)]
pub struct Namespace {
    entries: &'static [NamespaceEntry],
}

impl Namespace {
    /// Build a namespace from a static entry table, rejecting duplicate names.
    pub fn new(entries: &'static [NamespaceEntry]) -> Result<Self, TerminalError> {
        for (idx, entry) in entries.iter().enumerate() {
            if entries[..idx].iter().any(|prior| prior.name == entry.name) {
                return Err(TerminalError::DuplicateEntry(entry.name));
            }
        }
        Ok(Self { entries })
    }

    /// The built-in six-topic studio namespace.
    #[must_use]
    pub const fn studio() -> Self {
        Self {
            entries: STUDIO_ENTRIES,
        }
    }

    /// Resolve a topic by exact, case-sensitive name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&'static NamespaceEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Entries in declared order.
    pub fn entries(&self) -> impl Iterator<Item = &'static NamespaceEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return true when the namespace has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flat listing of every entry, unsorted.
    #[must_use]
    pub fn listing(&self) -> Vec<ListingEntry> {
        self.entries
            .iter()
            .map(|entry| ListingEntry {
                name: entry.name,
                kind: entry.kind,
            })
            .collect()
    }

    /// Two-level tree of entries and their child labels.
    #[must_use]
    pub fn tree(&self) -> Tree {
        let branches = self
            .entries
            .iter()
            .map(|entry| TreeBranch {
                name: entry.name,
                kind: entry.kind,
                children: entry.children,
            })
            .collect();
        Tree {
            root: TREE_ROOT,
            branches,
        }
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::studio()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn studio_has_six_topics_in_order() {
        let names: Vec<&str> = Namespace::studio().entries().map(|e| e.name()).collect();
        assert_eq!(
            names,
            ["about", "projects", "services", "contact", "blog", "challenges"]
        );
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let ns = Namespace::studio();
        assert!(ns.lookup("projects").is_some());
        assert!(ns.lookup("Projects").is_none());
        assert!(ns.lookup("web-apps").is_none(), "children are not navigable");
    }

    #[test]
    fn files_have_no_children() {
        let about = Namespace::studio().lookup("about").unwrap();
        assert_eq!(about.kind(), EntryKind::File);
        assert!(about.children().is_empty());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        static DUPES: &[NamespaceEntry] = &[
            NamespaceEntry::file("about"),
            NamespaceEntry::directory("about", &["x"]),
        ];
        assert_eq!(
            Namespace::new(DUPES).unwrap_err(),
            TerminalError::DuplicateEntry("about")
        );
    }
}
