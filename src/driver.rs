// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Single-owner session actor serializing commands, keys and timers.
// Author: Lukas Bower

//! Single-owner session actor serializing commands, keys and timers.
//!
//! [`Terminal`] owns the session state and is only ever driven through
//! `&mut self`, one event at a time. [`spawn`] moves it onto a dedicated thread
//! fed by a channel so multi-threaded hosts keep that guarantee.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use slicedterm_core::{
    ChallengeDeck, ContentProvider, Detection, Interpreter, Namespace, OutputRecord,
    SecretDetector, SecretSequence, SessionState, Step, StudioContent, DEFAULT_OVERLAY_MS,
};
use thiserror::Error;

use crate::config::TerminalConfig;
use crate::timer::{Scheduler, TimerId};

/// Input accepted by the session actor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A line submitted with Enter.
    Submit(String),
    /// A raw key identifier such as `ArrowUp` or `b`.
    Key(String),
    /// Browse the challenge deck on display.
    Browse(Step),
    /// Cancel timers and stop.
    Shutdown,
}

/// Display updates emitted by the session actor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    /// A record was appended; `path` is the prompt path it was submitted at.
    Record {
        /// Prompt path.
        path: String,
        /// New record.
        record: OutputRecord,
    },
    /// Scrollback was emptied.
    Cleared,
    /// Current path changed.
    Path(String),
    /// Full-screen overlay should appear with this text.
    OverlayShown(&'static str),
    /// Overlay reset fired.
    OverlayHidden,
    /// Cursor blink state.
    Cursor(bool),
    /// Challenge deck moved.
    Challenge(ChallengeDeck),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum TimerAction {
    ClearEffect,
    Blink,
}

/// Errors raised when talking to a spawned actor.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The actor thread could not be started.
    #[error("failed to start session thread: {0}")]
    Spawn(#[from] std::io::Error),
    /// The actor has already stopped.
    #[error("session actor is no longer running")]
    Disconnected,
    /// The actor thread panicked.
    #[error("session actor panicked")]
    Panicked,
}

/// The session plus everything that may mutate it.
pub struct Terminal {
    session: SessionState,
    namespace: Namespace,
    content: Box<dyn ContentProvider + Send>,
    detector: SecretDetector,
    scheduler: Scheduler<TimerAction>,
    overlay_timer: Option<TimerId>,
    overlay_ms: u64,
    blink_ms: Option<u64>,
    cursor_visible: bool,
    running: bool,
}

impl Terminal {
    /// Studio namespace, studio copy and the Konami code, tuned by `config`.
    #[must_use]
    pub fn new(config: &TerminalConfig) -> Self {
        Self::with_parts(
            Namespace::studio(),
            Box::new(StudioContent),
            SecretSequence::konami(),
        )
        .overlay_ms(config.overlay_ms)
        .blink_ms(Some(config.blink_ms))
    }

    /// Assemble a terminal from explicit parts. Blinking is off by default.
    #[must_use]
    pub fn with_parts(
        namespace: Namespace,
        content: Box<dyn ContentProvider + Send>,
        sequence: SecretSequence,
    ) -> Self {
        Self {
            session: SessionState::new(),
            namespace,
            content,
            detector: SecretDetector::new(sequence),
            scheduler: Scheduler::new(),
            overlay_timer: None,
            overlay_ms: DEFAULT_OVERLAY_MS,
            blink_ms: None,
            cursor_visible: true,
            running: true,
        }
    }

    /// Set how long the `matrix` overlay stays up.
    #[must_use]
    pub fn overlay_ms(mut self, overlay_ms: u64) -> Self {
        self.overlay_ms = overlay_ms;
        self
    }

    /// Set or disable the cursor blink interval.
    #[must_use]
    pub fn blink_ms(mut self, blink_ms: Option<u64>) -> Self {
        self.blink_ms = blink_ms;
        self
    }

    /// Session state.
    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Consume the terminal, keeping the session.
    #[must_use]
    pub fn into_session(self) -> SessionState {
        self.session
    }

    /// Whether the terminal still accepts events.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of pending timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Earliest timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    /// Arm periodic timers. Call once before the first event.
    pub fn start(&mut self, now_ms: u64) -> Vec<Frame> {
        if let Some(blink_ms) = self.blink_ms {
            self.scheduler
                .schedule_every(now_ms, blink_ms, TimerAction::Blink);
        }
        self.cursor_visible = true;
        vec![Frame::Cursor(true)]
    }

    /// Fire due timers, then process `event`.
    pub fn handle(&mut self, event: TerminalEvent, now_ms: u64) -> Vec<Frame> {
        let mut frames = self.advance(now_ms);
        if !self.running {
            warn!("dropping {event:?} after shutdown");
            return frames;
        }
        match event {
            TerminalEvent::Submit(line) => self.submit(&line, now_ms, &mut frames),
            TerminalEvent::Key(key) => self.key(&key, &mut frames),
            TerminalEvent::Browse(step) => {
                if let Some(deck) = self.session.browse(step) {
                    frames.push(Frame::Challenge(deck));
                }
            }
            TerminalEvent::Shutdown => self.shutdown(),
        }
        frames
    }

    /// Fire every timer due at `now_ms`.
    pub fn advance(&mut self, now_ms: u64) -> Vec<Frame> {
        let mut frames = Vec::new();
        for (id, action) in self.scheduler.poll_due(now_ms) {
            match action {
                TimerAction::ClearEffect => {
                    if self.overlay_timer == Some(id) {
                        self.overlay_timer = None;
                    }
                    if self.session.expire_effect(now_ms) {
                        debug!("overlay cleared at {now_ms} ms");
                        frames.push(Frame::OverlayHidden);
                    }
                }
                TimerAction::Blink => {
                    self.cursor_visible = !self.cursor_visible;
                    frames.push(Frame::Cursor(self.cursor_visible));
                }
            }
        }
        frames
    }

    /// Cancel all timers and stop accepting events.
    pub fn shutdown(&mut self) {
        if self.running {
            info!(
                "session shutting down with {} record(s), {} timer(s) canceled",
                self.session.scrollback().len(),
                self.scheduler.pending()
            );
        }
        self.scheduler.cancel_all();
        self.overlay_timer = None;
        self.running = false;
    }

    fn submit(&mut self, line: &str, now_ms: u64, frames: &mut Vec<Frame>) {
        let prompt_path = self.session.current_path().to_owned();
        let interpreter = Interpreter::new(&self.namespace, self.content.as_ref())
            .with_overlay_duration(self.overlay_ms);
        let Some(applied) = self.session.submit(&interpreter, line, now_ms) else {
            return;
        };

        if applied.cleared {
            frames.push(Frame::Cleared);
        }
        if applied.appended {
            if let Some(record) = self.session.scrollback().last() {
                frames.push(Frame::Record {
                    path: prompt_path,
                    record: record.clone(),
                });
            }
        }
        if let Some(path) = applied.path {
            frames.push(Frame::Path(path));
        }
        if let Some(effect) = applied.effect {
            if let Some(previous) = self.overlay_timer.take() {
                self.scheduler.cancel(previous);
            }
            let duration = effect.until_ms.saturating_sub(effect.since_ms);
            self.overlay_timer = Some(self.scheduler.schedule_once(
                now_ms,
                duration,
                TimerAction::ClearEffect,
            ));
            debug!("overlay scheduled for {duration} ms");
            frames.push(Frame::OverlayShown(effect.kind.text()));
        }
    }

    fn key(&mut self, key: &str, frames: &mut Vec<Frame>) {
        if self.detector.feed_into(key, &mut self.session) == Detection::Matched {
            if let Some(record) = self.session.scrollback().last() {
                frames.push(Frame::Record {
                    path: self.session.current_path().to_owned(),
                    record: record.clone(),
                });
            }
        }
    }
}

/// Channel endpoints for a spawned [`Terminal`].
pub struct TerminalHandle {
    events: Sender<TerminalEvent>,
    frames: Receiver<Frame>,
    worker: Option<JoinHandle<SessionState>>,
}

impl TerminalHandle {
    /// Queue an event for the actor.
    pub fn send(&self, event: TerminalEvent) -> Result<(), DriverError> {
        self.events
            .send(event)
            .map_err(|_| DriverError::Disconnected)
    }

    /// Drain frames produced so far without blocking.
    pub fn drain(&self) -> Vec<Frame> {
        self.frames.try_iter().collect()
    }

    /// Wait up to `timeout` for the next frame.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Frame> {
        self.frames.recv_timeout(timeout).ok()
    }

    /// Stop the actor, cancel its timers and return the final session.
    pub fn shutdown(mut self) -> Result<SessionState, DriverError> {
        let _ = self.events.send(TerminalEvent::Shutdown);
        let worker = self.worker.take().ok_or(DriverError::Disconnected)?;
        worker.join().map_err(|_| DriverError::Panicked)
    }
}

impl Drop for TerminalHandle {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = self.events.send(TerminalEvent::Shutdown);
            let _ = worker.join();
        }
    }
}

/// Run `terminal` on its own thread.
pub fn spawn(terminal: Terminal) -> Result<TerminalHandle, DriverError> {
    let (event_tx, event_rx) = mpsc::channel();
    let (frame_tx, frame_rx) = mpsc::channel();
    let worker = thread::Builder::new()
        .name("slicedterm-session".to_owned())
        .spawn(move || run_actor(terminal, &event_rx, &frame_tx))?;
    Ok(TerminalHandle {
        events: event_tx,
        frames: frame_rx,
        worker: Some(worker),
    })
}

fn run_actor(
    mut terminal: Terminal,
    events: &Receiver<TerminalEvent>,
    frames: &Sender<Frame>,
) -> SessionState {
    let clock = Instant::now();
    let now = || u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX);

    let mut outgoing = terminal.start(now());
    loop {
        if outgoing.drain(..).any(|frame| frames.send(frame).is_err()) {
            debug!("frame receiver dropped");
            break;
        }
        if !terminal.is_running() {
            break;
        }
        let event = match terminal.next_deadline() {
            Some(deadline) => {
                let wait = Duration::from_millis(deadline.saturating_sub(now()));
                match events.recv_timeout(wait) {
                    Ok(event) => Some(event),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            None => match events.recv() {
                Ok(event) => Some(event),
                Err(_) => break,
            },
        };
        outgoing = match event {
            Some(event) => terminal.handle(event, now()),
            None => terminal.advance(now()),
        };
    }
    terminal.shutdown();
    terminal.into_session()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_terminal() -> Terminal {
        Terminal::with_parts(
            Namespace::studio(),
            Box::new(StudioContent),
            SecretSequence::konami(),
        )
    }

    #[test]
    fn submit_reports_prompt_path_at_submission() {
        let mut terminal = quiet_terminal();
        let frames = terminal.handle(TerminalEvent::Submit("cd blog".into()), 0);
        match &frames[0] {
            Frame::Record { path, record } => {
                assert_eq!(path, "~");
                assert_eq!(record.input(), "cd blog");
            }
            other => panic!("unexpected frame {other:?}"),
        }
        assert_eq!(frames[1], Frame::Path("~/blog".into()));
    }

    #[test]
    fn blank_submissions_produce_nothing() {
        let mut terminal = quiet_terminal();
        assert!(terminal
            .handle(TerminalEvent::Submit("   ".into()), 0)
            .is_empty());
        assert!(terminal.session().scrollback().is_empty());
    }

    #[test]
    fn events_after_shutdown_are_dropped() {
        let mut terminal = quiet_terminal();
        terminal.handle(TerminalEvent::Shutdown, 0);
        terminal.handle(TerminalEvent::Submit("ls".into()), 1);
        assert!(terminal.session().scrollback().is_empty());
    }
}
