// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Error taxonomy shared by the slicedterm interpreter and models.
// Author: Lukas Bower

//! Error taxonomy shared by the slicedterm interpreter and models.

use alloc::string::String;
use core::fmt;

/// Errors surfaced by the core models.
///
/// `UnknownCommand`, `DirectoryNotFound` and `FileNotFound` are expected user
/// outcomes: the interpreter turns them into `ErrorText` payloads rather than
/// returning them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum TerminalError {
    EmptyLine,
    UnknownCommand(String),
    DirectoryNotFound(String),
    FileNotFound(String),
    DuplicateEntry(&'static str),
    EmptySequence,
    SequenceTooLong(usize),
}

impl TerminalError {
    /// Return true when the error describes ordinary user input rather than
    /// misconfigured models.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyLine
                | Self::UnknownCommand(_)
                | Self::DirectoryNotFound(_)
                | Self::FileNotFound(_)
        )
    }
}

impl fmt::Display for TerminalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLine => write!(f, "empty command"),
            Self::UnknownCommand(command) => write!(f, "Command not found: {command}"),
            Self::DirectoryNotFound(_) => write!(f, "Directory not found"),
            Self::FileNotFound(_) => write!(f, "File not found"),
            Self::DuplicateEntry(name) => write!(f, "duplicate namespace entry: {name}"),
            Self::EmptySequence => write!(f, "secret sequence must not be empty"),
            Self::SequenceTooLong(len) => {
                write!(f, "secret sequence of {len} bytes exceeds the progress buffer")
            }
        }
    }
}
