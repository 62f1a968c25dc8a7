// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Host runtime for the slicedterm portfolio terminal.
// Author: Lukas Bower
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Host runtime for the slicedterm portfolio terminal.
//!
//! The interpreter and session model live in `slicedterm-core`; this crate
//! adds configuration, timers, the session actor, rendering and the two host
//! front ends (interactive console and script runner).

pub mod config;
pub mod console;
pub mod driver;
pub mod render;
pub mod script;
pub mod timer;
pub mod transcript;

pub use config::{ColorMode, ConfigError, TerminalConfig};
pub use driver::{spawn, DriverError, Frame, Terminal, TerminalEvent, TerminalHandle};
pub use render::Renderer;
pub use script::{parse_script, run_script, write_banner, ScriptError, ScriptOp};
pub use timer::{Scheduler, TimerId};
pub use transcript::{Transcript, TranscriptError};
