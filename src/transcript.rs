// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: JSON export of a session's scrollback.
// Author: Lukas Bower

//! JSON export of a session's scrollback.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use slicedterm_core::{OutputRecord, SessionState};
use thiserror::Error;

/// Errors raised while writing a transcript.
#[derive(Debug, Error)]
pub enum TranscriptError {
    /// The file could not be created or written.
    #[error("failed to write transcript {path}: {source}")]
    Io {
        /// Destination.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The records could not be encoded.
    #[error("failed to encode transcript: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Serialized view of a session.
#[derive(Debug, Serialize)]
pub struct Transcript<'a> {
    /// Path the session ended in.
    pub current_path: &'a str,
    /// Scrollback in order.
    pub records: &'a [OutputRecord],
}

impl<'a> Transcript<'a> {
    /// Borrow a session for export.
    #[must_use]
    pub fn of(session: &'a SessionState) -> Self {
        Self {
            current_path: session.current_path(),
            records: session.scrollback(),
        }
    }

    /// Encode as pretty JSON into `writer`.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), TranscriptError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Encode as pretty JSON into a new file at `path`.
    pub fn save(&self, path: &Path) -> Result<(), TranscriptError> {
        let io_err = |source| TranscriptError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush().map_err(io_err)
    }
}
