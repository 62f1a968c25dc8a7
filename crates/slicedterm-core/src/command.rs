// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Command line tokenizer for the studio terminal.
// Author: Lukas Bower

//! Command line tokenizer for the studio terminal.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::TerminalError;
use crate::verb::Verb;

/// Maximum length accepted by interactive line editors.
pub const MAX_LINE_LEN: usize = 256;

/// A tokenized input line: lower-cased command plus positional arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLine<'a> {
    raw: &'a str,
    command: String,
    args: Vec<&'a str>,
}

impl<'a> CommandLine<'a> {
    /// Split a trimmed line on whitespace. Arguments keep their case.
    pub fn parse(line: &'a str) -> Result<Self, TerminalError> {
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            return Err(TerminalError::EmptyLine);
        };
        Ok(Self {
            raw: line,
            command: first.to_lowercase(),
            args: tokens.collect(),
        })
    }

    /// Line as submitted.
    #[must_use]
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// Case-folded command token.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Positional arguments.
    #[must_use]
    pub fn args(&self) -> &[&'a str] {
        &self.args
    }

    /// Positional argument at `index`.
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).copied()
    }

    /// Known command, if any.
    #[must_use]
    pub fn verb(&self) -> Option<Verb> {
        Verb::from_token(&self.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verb::VERB_SPECS;

    #[test]
    fn command_is_case_folded_but_args_are_not() {
        let line = CommandLine::parse("  CD Projects  ").unwrap();
        assert_eq!(line.command(), "cd");
        assert_eq!(line.args(), ["Projects"]);
        assert_eq!(line.verb(), Some(Verb::Cd));
    }

    #[test]
    fn runs_of_whitespace_do_not_produce_empty_args() {
        let line = CommandLine::parse("cd \t  blog").unwrap();
        assert_eq!(line.arg(0), Some("blog"));
        assert_eq!(line.arg(1), None);
    }

    #[test]
    fn blank_lines_are_rejected() {
        assert_eq!(
            CommandLine::parse("   ").unwrap_err(),
            TerminalError::EmptyLine
        );
    }

    #[test]
    fn verb_spec_examples_parse() {
        for spec in VERB_SPECS.iter() {
            let line = CommandLine::parse(spec.example)
                .unwrap_or_else(|err| panic!("failed to parse {}: {err:?}", spec.example));
            assert_eq!(line.verb(), Some(spec.verb));
        }
    }

    #[test]
    fn unknown_commands_still_tokenize() {
        let line = CommandLine::parse("sudo rm -rf").unwrap();
        assert_eq!(line.verb(), None);
        assert_eq!(line.args().len(), 2);
    }
}
