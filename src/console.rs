// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Interactive raw-mode console host for the terminal actor.
// Author: Lukas Bower

//! Interactive raw-mode console host for the terminal actor.
//!
//! Every key press goes to the actor as a raw key identifier (for the secret
//! sequence) and, independently, to the local line editor. Enter submits the
//! edited line. Output arrives back as frames from the actor.

use std::io::{self, Write};
use std::mem;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, MoveToColumn, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use log::debug;
use slicedterm_core::{SessionState, Step, HOME_PATH, MAX_LINE_LEN};

use crate::driver::{self, Frame, Terminal, TerminalEvent};
use crate::render::Renderer;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Single-line editor with a character cursor.
#[derive(Debug, Default)]
pub struct LineEditor {
    chars: Vec<char>,
    cursor: usize,
}

impl LineEditor {
    /// Insert a character at the cursor. Returns false once the line is full.
    pub fn insert(&mut self, ch: char) -> bool {
        if self.chars.len() >= MAX_LINE_LEN {
            return false;
        }
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
        true
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
        }
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.chars.len() {
            self.chars.remove(self.cursor);
        }
    }

    /// Move the cursor one character left.
    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor one character right.
    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.chars.len());
    }

    /// Move the cursor to the start of the line.
    pub fn home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end of the line.
    pub fn end(&mut self) {
        self.cursor = self.chars.len();
    }

    /// Cursor position in characters.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Take the text and reset the editor.
    pub fn take(&mut self) -> String {
        let text = self.text();
        self.chars.clear();
        self.cursor = 0;
        text
    }
}

/// Map a key press to the identifier the secret detector expects.
#[must_use]
pub fn key_identifier(key: &KeyEvent) -> Option<String> {
    let name = match key.code {
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Enter => "Enter",
        KeyCode::Backspace => "Backspace",
        KeyCode::Delete => "Delete",
        KeyCode::Tab => "Tab",
        KeyCode::Esc => "Escape",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        KeyCode::Char(ch) => return Some(ch.to_string()),
        _ => return None,
    };
    Some(name.to_owned())
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        enable_raw_mode().context("enable raw mode")?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show);
        let _ = disable_raw_mode();
    }
}

struct Screen<W: Write> {
    out: W,
    renderer: Renderer,
    path: String,
    overlay: bool,
    // Output produced while the overlay owns the alternate screen.
    held: Vec<String>,
    clear_on_exit: bool,
}

impl<W: Write> Screen<W> {
    fn new(out: W, renderer: Renderer) -> Self {
        Self {
            out,
            renderer,
            path: HOME_PATH.to_owned(),
            overlay: false,
            held: Vec::new(),
            clear_on_exit: false,
        }
    }

    fn emit(&mut self, lines: Vec<String>) -> Result<()> {
        if self.overlay {
            self.held.extend(lines);
            return Ok(());
        }
        self.clear_prompt()?;
        self.print_lines(&lines)
    }

    fn print_lines(&mut self, lines: &[String]) -> Result<()> {
        for line in lines {
            queue!(self.out, Print(line), Print("\r\n"))?;
        }
        Ok(())
    }

    fn clear_prompt(&mut self) -> Result<()> {
        queue!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        Ok(())
    }

    fn draw_prompt(&mut self, editor: &LineEditor) -> Result<()> {
        if self.overlay {
            return Ok(());
        }
        let prompt = self.renderer.prompt(&self.path, &editor.text());
        let column = self.path.chars().count()
            + self.renderer.prompt_symbol().chars().count()
            + 2
            + editor.cursor();
        self.clear_prompt()?;
        queue!(
            self.out,
            Print(prompt),
            MoveToColumn(u16::try_from(column).unwrap_or(u16::MAX))
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn show_overlay(&mut self, text: &str) -> Result<()> {
        if !self.overlay {
            execute!(self.out, EnterAlternateScreen)?;
            self.overlay = true;
        }
        let (cols, rows) = terminal::size().unwrap_or((80, 24));
        let plain: Vec<&str> = text.lines().collect();
        let styled = self.renderer.overlay(text);
        let height = u16::try_from(plain.len()).unwrap_or(rows);
        let top = rows.saturating_sub(height) / 2;
        queue!(self.out, Hide, Clear(ClearType::All))?;
        for (idx, (raw, line)) in plain.iter().zip(styled.iter()).enumerate() {
            let width = u16::try_from(raw.chars().count()).unwrap_or(cols);
            let row = top.saturating_add(u16::try_from(idx).unwrap_or(0));
            queue!(
                self.out,
                MoveTo(cols.saturating_sub(width) / 2, row),
                Print(line)
            )?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn hide_overlay(&mut self) -> Result<()> {
        if self.overlay {
            execute!(self.out, LeaveAlternateScreen, Show)?;
            self.overlay = false;
            if mem::take(&mut self.clear_on_exit) {
                queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
            }
            let held = mem::take(&mut self.held);
            self.clear_prompt()?;
            self.print_lines(&held)?;
        }
        Ok(())
    }

    fn apply(&mut self, frame: Frame) -> Result<()> {
        match frame {
            Frame::Record { path, record } => {
                let lines = self.renderer.record(&path, &record);
                self.emit(lines)?;
            }
            Frame::Cleared if self.overlay => {
                self.held.clear();
                self.clear_on_exit = true;
            }
            Frame::Cleared => {
                queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
            }
            Frame::Path(path) => self.path = path,
            Frame::OverlayShown(text) => self.show_overlay(text)?,
            Frame::OverlayHidden => self.hide_overlay()?,
            Frame::Cursor(visible) => {
                if !self.overlay {
                    if visible {
                        queue!(self.out, Show)?;
                    } else {
                        queue!(self.out, Hide)?;
                    }
                }
            }
            Frame::Challenge(deck) => {
                let lines = self.renderer.challenge(&deck);
                self.emit(lines)?;
            }
        }
        Ok(())
    }
}

/// Run the interactive console until Ctrl-C or Ctrl-D and return the session.
pub fn run_interactive(terminal: Terminal, renderer: Renderer, banner: bool) -> Result<SessionState> {
    let _raw = RawModeGuard::enable()?;
    let handle = driver::spawn(terminal).context("start session actor")?;
    let mut screen = Screen::new(io::stdout(), renderer);
    if banner {
        let lines = screen.renderer.banner();
        screen.print_lines(&lines)?;
    }
    let mut editor = LineEditor::default();
    screen.draw_prompt(&editor)?;

    loop {
        let mut dirty = false;
        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
                    {
                        break;
                    }
                    if let Some(name) = key_identifier(&key) {
                        handle.send(TerminalEvent::Key(name))?;
                    }
                    dirty = edit(&handle, &mut editor, key.code)?;
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }
        let frames = handle.drain();
        if !frames.is_empty() {
            dirty = true;
        }
        for frame in frames {
            screen.apply(frame)?;
        }
        if dirty {
            screen.draw_prompt(&editor)?;
        }
    }

    screen.hide_overlay()?;
    screen.clear_prompt()?;
    screen.out.flush()?;
    debug!("console exiting");
    let session = handle.shutdown()?;
    Ok(session)
}

fn edit(
    handle: &driver::TerminalHandle,
    editor: &mut LineEditor,
    code: KeyCode,
) -> Result<bool> {
    match code {
        KeyCode::Enter => {
            if editor.text().trim().is_empty() {
                return Ok(false);
            }
            handle.send(TerminalEvent::Submit(editor.take()))?;
        }
        KeyCode::PageUp => handle.send(TerminalEvent::Browse(Step::Back))?,
        KeyCode::PageDown => handle.send(TerminalEvent::Browse(Step::Forward))?,
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Delete => editor.delete(),
        KeyCode::Left => editor.left(),
        KeyCode::Right => editor.right(),
        KeyCode::Home => editor.home(),
        KeyCode::End => editor.end(),
        KeyCode::Char(ch) => {
            editor.insert(ch);
        }
        _ => return Ok(false),
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slicedterm_core::{Interpreter, Namespace, StudioContent};

    #[test]
    fn editor_inserts_at_cursor() {
        let mut editor = LineEditor::default();
        for ch in "cd blg".chars() {
            editor.insert(ch);
        }
        editor.left();
        editor.insert('o');
        assert_eq!(editor.text(), "cd blog");
        editor.end();
        editor.backspace();
        editor.home();
        editor.delete();
        assert_eq!(editor.text(), "d blo");
        assert_eq!(editor.take(), "d blo");
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn editor_caps_line_length() {
        let mut editor = LineEditor::default();
        for _ in 0..MAX_LINE_LEN {
            assert!(editor.insert('x'));
        }
        assert!(!editor.insert('x'));
    }

    fn screen_text(screen: &Screen<Vec<u8>>) -> String {
        String::from_utf8_lossy(&screen.out).into_owned()
    }

    fn ls_record() -> Frame {
        let namespace = Namespace::studio();
        let execution = Interpreter::new(&namespace, &StudioContent).execute("ls");
        Frame::Record {
            path: "~".to_owned(),
            record: execution.record.expect("ls record"),
        }
    }

    #[test]
    fn output_during_overlay_reaches_the_main_screen() {
        let mut screen = Screen::new(Vec::new(), Renderer::plain());
        screen.apply(Frame::OverlayShown("Wake up")).unwrap();
        screen.apply(ls_record()).unwrap();
        assert!(!screen_text(&screen).contains("~ $ ls"));

        screen.apply(Frame::OverlayHidden).unwrap();
        let text = screen_text(&screen);
        let left = text.rfind("\u{1b}[?1049l").expect("left alternate screen");
        let shown = text.find("~ $ ls").expect("held record printed");
        assert!(shown > left);
        assert!(screen.held.is_empty());
    }

    #[test]
    fn clear_during_overlay_drops_held_output() {
        let mut screen = Screen::new(Vec::new(), Renderer::plain());
        screen.apply(Frame::OverlayShown("Wake up")).unwrap();
        screen.apply(ls_record()).unwrap();
        screen.apply(Frame::Cleared).unwrap();
        screen.apply(Frame::OverlayHidden).unwrap();
        assert!(!screen_text(&screen).contains("~ $ ls"));
    }

    #[test]
    fn arrow_keys_map_to_dom_names() {
        let key = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(key_identifier(&key).as_deref(), Some("ArrowUp"));
        let key = KeyEvent::new(KeyCode::Char('B'), KeyModifiers::SHIFT);
        assert_eq!(key_identifier(&key).as_deref(), Some("B"));
        let key = KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE);
        assert_eq!(key_identifier(&key), None);
    }
}
