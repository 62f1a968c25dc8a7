// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Validate overlay timers, cancellation and the spawned session actor.
// Author: Lukas Bower

use std::time::Duration;

use slicedterm::{spawn, Frame, Terminal, TerminalConfig, TerminalEvent};
use slicedterm_core::{
    ContentPayload, Namespace, SecretSequence, Step, StudioContent, KONAMI_KEYS,
};

fn terminal() -> Terminal {
    Terminal::with_parts(
        Namespace::studio(),
        Box::new(StudioContent),
        SecretSequence::konami(),
    )
}

fn submit(terminal: &mut Terminal, line: &str, now_ms: u64) -> Vec<Frame> {
    terminal.handle(TerminalEvent::Submit(line.to_owned()), now_ms)
}

#[test]
fn matrix_overlay_clears_after_its_duration() {
    let mut terminal = terminal();
    let frames = submit(&mut terminal, "matrix", 0);
    assert!(frames
        .iter()
        .any(|frame| matches!(frame, Frame::OverlayShown(_))));
    assert!(terminal.session().effect().is_some());
    assert_eq!(terminal.next_deadline(), Some(5_000));

    assert!(terminal.advance(4_999).is_empty());
    assert!(terminal.session().effect().is_some());

    assert_eq!(terminal.advance(5_000), [Frame::OverlayHidden]);
    assert!(terminal.session().effect().is_none());
    assert_eq!(terminal.pending_timers(), 0);
}

#[test]
fn retriggering_matrix_restarts_the_overlay() {
    let mut terminal = terminal().overlay_ms(1_000);
    submit(&mut terminal, "matrix", 0);
    submit(&mut terminal, "MATRIX", 600);
    assert_eq!(terminal.pending_timers(), 1);

    assert!(terminal.advance(1_000).is_empty());
    assert!(terminal.session().effect().is_some());
    assert_eq!(terminal.advance(1_600), [Frame::OverlayHidden]);
}

#[test]
fn shutdown_cancels_pending_timers() {
    let mut terminal = terminal().blink_ms(Some(500));
    terminal.start(0);
    submit(&mut terminal, "matrix", 10);
    assert_eq!(terminal.pending_timers(), 2);

    terminal.handle(TerminalEvent::Shutdown, 20);
    assert_eq!(terminal.pending_timers(), 0);
    assert!(!terminal.is_running());
    assert!(terminal.advance(10_000).is_empty());
    assert!(terminal.session().effect().is_some());
}

#[test]
fn cursor_blinks_on_its_period() {
    let mut terminal = terminal().blink_ms(Some(530));
    assert_eq!(terminal.start(0), [Frame::Cursor(true)]);
    assert_eq!(terminal.advance(530), [Frame::Cursor(false)]);
    assert!(terminal.advance(1_000).is_empty());
    assert_eq!(terminal.advance(1_060), [Frame::Cursor(true)]);
}

#[test]
fn konami_keys_append_reveal_between_commands() {
    let mut terminal = terminal();
    submit(&mut terminal, "cd about", 0);
    let mut frames = Vec::new();
    for key in KONAMI_KEYS {
        frames.extend(terminal.handle(TerminalEvent::Key(key.to_owned()), 1));
    }
    assert_eq!(frames.len(), 1);
    match &frames[0] {
        Frame::Record { path, record } => {
            assert_eq!(path, "~");
            assert_eq!(record.input(), "KONAMI CODE ACTIVATED");
            assert!(matches!(record.payload(), ContentPayload::PlainText(_)));
        }
        other => panic!("unexpected frame {other:?}"),
    }
    assert_eq!(terminal.session().scrollback().len(), 2);
}

#[test]
fn browsing_moves_the_challenge_deck() {
    let mut terminal = terminal();
    assert!(terminal
        .handle(TerminalEvent::Browse(Step::Forward), 0)
        .is_empty());
    submit(&mut terminal, "cd challenges", 0);
    match terminal.handle(TerminalEvent::Browse(Step::Back), 0).as_slice() {
        [Frame::Challenge(deck)] => assert_eq!(deck.current, 2),
        other => panic!("unexpected frames {other:?}"),
    }
}

#[test]
fn spawned_actor_round_trips_and_returns_session() {
    let config = TerminalConfig {
        overlay_ms: 20,
        ..TerminalConfig::default()
    };
    let handle = spawn(Terminal::new(&config).blink_ms(None)).expect("spawn actor");
    handle
        .send(TerminalEvent::Submit("cd projects".into()))
        .expect("send");
    handle
        .send(TerminalEvent::Submit("matrix".into()))
        .expect("send");

    let mut saw_hidden = false;
    for _ in 0..100 {
        match handle.recv_timeout(Duration::from_millis(50)) {
            Some(Frame::OverlayHidden) => {
                saw_hidden = true;
                break;
            }
            Some(_) | None => {}
        }
    }
    assert!(saw_hidden, "overlay reset never fired");

    let session = handle.shutdown().expect("shutdown");
    assert_eq!(session.current_path(), "~/projects");
    assert_eq!(session.scrollback().len(), 2);
    assert!(session.effect().is_none());
}
