// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Drive scripted sessions end to end through the plain renderer.
// Author: Lukas Bower

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use slicedterm::{parse_script, run_script, write_banner, Renderer, Terminal, TerminalConfig};
use slicedterm_core::content::WELCOME;

fn run(script: &str) -> (Vec<String>, Terminal) {
    let ops = parse_script(Cursor::new(script)).expect("parse script");
    let mut terminal = Terminal::new(&TerminalConfig::default()).blink_ms(None);
    let mut out = Vec::new();
    run_script(&mut terminal, &ops, &Renderer::plain(), &mut out).expect("run script");
    let text = String::from_utf8(out).expect("utf8 output");
    (text.lines().map(str::to_owned).collect(), terminal)
}

#[test]
fn navigation_prompts_follow_the_path() {
    let (lines, terminal) = run("cd blog\nls\ncd\n");
    assert_eq!(lines[0], "~ $ cd blog");
    assert!(lines.contains(&"~/blog $ ls".to_owned()));
    assert!(lines.contains(&"~/blog $ cd".to_owned()));
    assert_eq!(terminal.session().current_path(), "~");
    assert_eq!(terminal.session().scrollback().len(), 3);
}

#[test]
fn unknown_commands_and_topics_are_reported() {
    let (lines, terminal) = run("foo\ncd nowhere\n");
    assert_eq!(
        lines,
        [
            "~ $ foo",
            "Command not found: foo",
            "~ $ cd nowhere",
            "Directory not found",
        ]
    );
    assert!(terminal
        .session()
        .scrollback()
        .iter()
        .all(|record| record.is_error()));
}

#[test]
fn overlay_is_hidden_once_the_clock_passes_its_deadline() {
    let (lines, terminal) = run("matrix\n@wait 4999\n@wait 1\n");
    let shown = lines.iter().position(|line| line == "[overlay shown]");
    let hidden = lines.iter().position(|line| line == "[overlay hidden]");
    assert!(matches!((shown, hidden), (Some(a), Some(b)) if a < b));
    assert!(lines.contains(&"Wake up, Neo...".to_owned()));
    assert_eq!(terminal.pending_timers(), 0);
}

#[test]
fn clear_discards_scrollback() {
    let (lines, terminal) = run("help\nclear\nls\n");
    assert!(lines.contains(&"[cleared]".to_owned()));
    assert_eq!(terminal.session().scrollback().len(), 1);
    assert_eq!(terminal.session().scrollback()[0].input(), "ls");
}

#[test]
fn key_directives_unlock_the_secret() {
    let (lines, _) = run(
        "@key ArrowUp ArrowUp ArrowDown ArrowDown\n\
         @key ArrowLeft ArrowRight ArrowLeft ArrowRight b a\n",
    );
    assert_eq!(lines[0], "~ $ KONAMI CODE ACTIVATED");
    assert_eq!(lines[1], "↑↑↓↓←→←→BA");
}

#[test]
fn challenge_browsing_wraps() {
    let (lines, _) = run("cd challenges\n@prev\n@next\n@next\n");
    let positions: Vec<&String> = lines
        .iter()
        .filter(|line| line.contains("challenge ") && line.contains('/'))
        .collect();
    assert_eq!(positions.len(), 4);
    assert!(positions[0].contains("1/3"));
    assert!(positions[1].contains("3/3"));
    assert!(positions[2].contains("1/3"));
    assert!(positions[3].contains("2/3"));
}

#[test]
fn bundled_tour_script_runs() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scripts")
        .join("tour.term");
    let script = fs::read_to_string(&path).expect("tour script missing");
    let (lines, terminal) = run(&script);
    assert_eq!(lines[0], "~ $ help");
    assert!(!terminal.is_running());
    assert!(terminal.session().effect().is_none());
}

#[test]
fn banner_precedes_scripted_output() {
    let renderer = Renderer::plain();
    let mut out = Vec::new();
    write_banner(&renderer, &mut out).expect("write banner");
    let ops = parse_script(Cursor::new("ls\n")).expect("parse script");
    let mut terminal = Terminal::new(&TerminalConfig::default()).blink_ms(None);
    run_script(&mut terminal, &ops, &renderer, &mut out).expect("run script");

    let text = String::from_utf8(out).expect("utf8 output");
    let welcome = text.find(WELCOME).expect("welcome line");
    let prompt = text.find("~ $ ls").expect("ls prompt");
    assert!(welcome < prompt);
}
