// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Incremental matcher for the hidden key sequence.
// Author: Lukas Bower

//! Incremental matcher for the hidden key sequence.
//!
//! Keys are DOM-style identifiers (`ArrowUp`, `b`, `Enter`, ...). Progress is
//! the case-folded concatenation of the keys seen so far and is always a
//! prefix of the target, so it fits a fixed-capacity buffer.

use heapless::String;
use log::info;

use crate::content::{KONAMI_INPUT, KONAMI_REVEAL};
use crate::error::TerminalError;
use crate::payload::{ContentPayload, OutputRecord};

/// Capacity of the progress buffer.
pub const MAX_SEQUENCE_LEN: usize = 128;

/// Key identifiers making up the Konami code.
pub const KONAMI_KEYS: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "b",
    "a",
];

const KONAMI_TARGET: &str =
    "arrowuparrowuparrowdownarrowdownarrowleftarrowrightarrowleftarrowrightba";

/// Receiver for records synthesized outside command submission.
pub trait RecordSink {
    /// Append a record to the scrollback.
    fn push_record(&mut self, record: OutputRecord);
}

/// Immutable target sequence, built once at startup.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SecretSequence {
    target: &'static str,
}

impl SecretSequence {
    /// Wrap a concatenated, case-insensitive target.
    pub fn new(target: &'static str) -> Result<Self, TerminalError> {
        if target.is_empty() {
            return Err(TerminalError::EmptySequence);
        }
        let folded_len: usize = fold(target).map(char::len_utf8).sum();
        if folded_len > MAX_SEQUENCE_LEN {
            return Err(TerminalError::SequenceTooLong(folded_len));
        }
        Ok(Self { target })
    }

    /// The Konami code.
    #[must_use]
    pub const fn konami() -> Self {
        Self {
            target: KONAMI_TARGET,
        }
    }

    /// Target text.
    #[must_use]
    pub const fn target(&self) -> &'static str {
        self.target
    }

    // `progress` is already folded by `SecretDetector::extend`.
    fn has_prefix(&self, progress: &str) -> bool {
        let mut target = fold(self.target);
        progress.chars().all(|ch| target.next() == Some(ch))
    }

    fn matches(&self, progress: &str) -> bool {
        fold(self.target).eq(progress.chars())
    }
}

fn fold(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().flat_map(char::to_lowercase)
}

impl Default for SecretSequence {
    fn default() -> Self {
        Self::konami()
    }
}

/// Outcome of feeding one key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Detection {
    /// The key extended a valid prefix.
    Progress,
    /// The key broke the prefix; progress is empty again.
    Reset,
    /// The full sequence was entered; progress is empty again.
    Matched,
}

/// Finite-state prefix matcher over a [`SecretSequence`].
#[derive(Clone, Debug)]
pub struct SecretDetector {
    sequence: SecretSequence,
    progress: String<MAX_SEQUENCE_LEN>,
}

impl SecretDetector {
    /// Start with empty progress.
    #[must_use]
    pub fn new(sequence: SecretSequence) -> Self {
        Self {
            sequence,
            progress: String::new(),
        }
    }

    /// Matched prefix so far.
    #[must_use]
    pub fn progress(&self) -> &str {
        self.progress.as_str()
    }

    /// Drop any partial progress.
    pub fn reset(&mut self) {
        self.progress.clear();
    }

    /// Observe one key.
    pub fn feed(&mut self, key: &str) -> Detection {
        if !self.extend(key) || !self.sequence.has_prefix(self.progress.as_str()) {
            self.progress.clear();
            return Detection::Reset;
        }
        if self.sequence.matches(self.progress.as_str()) {
            info!("secret sequence matched");
            self.progress.clear();
            return Detection::Matched;
        }
        Detection::Progress
    }

    /// Observe one key and push the reveal record into `sink` on a match.
    pub fn feed_into<S: RecordSink + ?Sized>(&mut self, key: &str, sink: &mut S) -> Detection {
        let detection = self.feed(key);
        if detection == Detection::Matched {
            sink.push_record(reveal_record());
        }
        detection
    }

    fn extend(&mut self, key: &str) -> bool {
        if key.is_empty() {
            return false;
        }
        for ch in fold(key) {
            if self.progress.push(ch).is_err() {
                return false;
            }
        }
        true
    }
}

impl Default for SecretDetector {
    fn default() -> Self {
        Self::new(SecretSequence::konami())
    }
}

/// Record appended when the sequence matches.
#[must_use]
pub fn reveal_record() -> OutputRecord {
    OutputRecord::new(KONAMI_INPUT, ContentPayload::PlainText(KONAMI_REVEAL))
}
