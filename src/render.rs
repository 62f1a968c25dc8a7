// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Turn structured payloads into terminal lines.
// Author: Lukas Bower

//! Turn structured payloads into terminal lines.

use crossterm::style::{Color, Stylize};
use slicedterm_core::content::{BANNER, EASTER_EGG_HINT, WELCOME};
use slicedterm_core::{
    Card, ChallengeDeck, ContentPayload, Detail, Difficulty, EntryKind, HelpSheet, OutputRecord,
    Profile, Tone, Tree, TreeLineKind,
};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Weight {
    #[default]
    Regular,
    Bold,
    Blink,
}

struct Styled {
    text: String,
    tone: Tone,
    weight: Weight,
}

impl Styled {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
            weight: Weight::Regular,
        }
    }

    fn bold(mut self) -> Self {
        self.weight = Weight::Bold;
        self
    }

    fn blink(mut self) -> Self {
        self.weight = Weight::Blink;
        self
    }
}

/// Payload renderer with an optional ANSI colour layer.
#[derive(Clone, Debug)]
pub struct Renderer {
    color: bool,
    prompt_symbol: String,
}

impl Renderer {
    /// Create a renderer.
    #[must_use]
    pub fn new(color: bool, prompt_symbol: impl Into<String>) -> Self {
        Self {
            color,
            prompt_symbol: prompt_symbol.into(),
        }
    }

    /// Colourless renderer with the default `$` prompt.
    #[must_use]
    pub fn plain() -> Self {
        Self::new(false, "$")
    }

    /// Symbol printed between the path and the input.
    #[must_use]
    pub fn prompt_symbol(&self) -> &str {
        &self.prompt_symbol
    }

    /// Prompt line, e.g. `~/blog $ cd about`.
    #[must_use]
    pub fn prompt(&self, path: &str, input: &str) -> String {
        format!(
            "{} {} {}",
            self.paint(&Styled::new(path, Tone::Accent)),
            self.paint(&Styled::new(self.prompt_symbol.as_str(), Tone::Normal)),
            self.paint(&Styled::new(input, Tone::Highlight)),
        )
    }

    /// Prompt line followed by the payload.
    #[must_use]
    pub fn record(&self, path: &str, record: &OutputRecord) -> Vec<String> {
        let mut lines = vec![self.prompt(path, record.input())];
        lines.extend(self.payload(record.payload(), record.is_error()));
        lines
    }

    /// Payload lines; error payloads are drawn in the alert tone throughout.
    #[must_use]
    pub fn payload(&self, payload: &ContentPayload, is_error: bool) -> Vec<String> {
        let mut styled = layout(payload);
        if is_error {
            for line in &mut styled {
                line.tone = Tone::Alert;
            }
        }
        styled.iter().map(|line| self.paint(line)).collect()
    }

    /// The current card of a challenge deck.
    #[must_use]
    pub fn challenge(&self, deck: &ChallengeDeck) -> Vec<String> {
        challenge_lines(deck)
            .iter()
            .map(|line| self.paint(line))
            .collect()
    }

    /// Banner, greeting and hint shown at start-up.
    #[must_use]
    pub fn banner(&self) -> Vec<String> {
        let mut lines: Vec<Styled> = BANNER
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| Styled::new(line, Tone::Normal))
            .collect();
        lines.push(Styled::new("", Tone::Normal));
        lines.push(Styled::new(WELCOME, Tone::Highlight));
        lines.push(Styled::new(EASTER_EGG_HINT, Tone::Accent));
        lines.iter().map(|line| self.paint(line)).collect()
    }

    /// Overlay text lines in the success tone.
    #[must_use]
    pub fn overlay(&self, text: &str) -> Vec<String> {
        text.lines()
            .map(|line| self.paint(&Styled::new(line, Tone::Success).blink()))
            .collect()
    }

    fn paint(&self, styled: &Styled) -> String {
        if !self.color || styled.text.is_empty() {
            return styled.text.clone();
        }
        let content = styled.text.as_str().with(tone_color(styled.tone));
        match styled.weight {
            Weight::Regular => content.to_string(),
            Weight::Bold => content.bold().to_string(),
            Weight::Blink => content.slow_blink().to_string(),
        }
    }
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Normal => Color::White,
        Tone::Accent => Color::Yellow,
        Tone::Highlight => Color::DarkYellow,
        Tone::Success => Color::Green,
        Tone::Alert => Color::Red,
    }
}

fn layout(payload: &ContentPayload) -> Vec<Styled> {
    match payload {
        ContentPayload::Empty => Vec::new(),
        ContentPayload::Listing(entries) => entries
            .iter()
            .map(|entry| match entry.kind {
                EntryKind::Directory => {
                    Styled::new(format!("[dir]  {}", entry.name), Tone::Accent).bold()
                }
                EntryKind::File => Styled::new(format!("[file] {}", entry.name), Tone::Normal).bold(),
            })
            .collect(),
        ContentPayload::Tree(tree) => tree_lines(tree, true),
        ContentPayload::Detail(Detail::Cards { cards }) => card_lines(cards),
        ContentPayload::Detail(Detail::Profile(profile)) => profile_lines(profile),
        ContentPayload::Detail(Detail::Challenges(deck)) => challenge_lines(deck),
        ContentPayload::Help(sheet) => help_lines(sheet),
        ContentPayload::PlainText(text) => text
            .text
            .lines()
            .map(|line| {
                let styled = Styled::new(line, text.tone);
                if text.animated {
                    styled.blink()
                } else {
                    styled
                }
            })
            .collect(),
        ContentPayload::ErrorText(message) => vec![Styled::new(message.as_str(), Tone::Alert)],
    }
}

fn tree_lines(tree: &Tree, include_root: bool) -> Vec<Styled> {
    tree.lines(include_root)
        .iter()
        .map(|line| {
            let text = line.to_plain();
            match line.kind {
                TreeLineKind::Root | TreeLineKind::Directory => {
                    Styled::new(text, Tone::Accent).bold()
                }
                TreeLineKind::File => Styled::new(text, Tone::Normal),
                TreeLineKind::Child => Styled::new(text, Tone::Highlight),
            }
        })
        .collect()
}

fn card_lines(cards: &[Card]) -> Vec<Styled> {
    let mut lines = Vec::new();
    for (idx, card) in cards.iter().enumerate() {
        if idx > 0 {
            lines.push(Styled::new("", Tone::Normal));
        }
        lines.push(Styled::new(card.title, Tone::Accent).bold());
        lines.push(Styled::new(format!("  {}", card.summary), Tone::Normal));
        if !card.tags.is_empty() {
            let tags: Vec<String> = card.tags.iter().map(|tag| format!("[{tag}]")).collect();
            lines.push(Styled::new(format!("  {}", tags.join(" ")), Tone::Highlight));
        }
        if let Some(date) = card.date {
            lines.push(Styled::new(format!("  {date}"), Tone::Highlight));
        }
    }
    lines
}

fn profile_lines(profile: &Profile) -> Vec<Styled> {
    let mut lines = vec![Styled::new(profile.heading, Tone::Accent).bold()];
    if let Some(body) = profile.body {
        lines.push(Styled::new(body, Tone::Normal));
    }
    lines.extend(profile.facts.iter().map(|fact| {
        Styled::new(format!("→ {}: {}", fact.label, fact.value), Tone::Highlight)
    }));
    lines
}

fn challenge_lines(deck: &ChallengeDeck) -> Vec<Styled> {
    let Some(challenge) = deck.current() else {
        return vec![Styled::new("No challenges available", Tone::Alert)];
    };
    let difficulty_tone = match challenge.difficulty {
        Difficulty::Easy => Tone::Success,
        Difficulty::Medium => Tone::Highlight,
    };
    vec![
        Styled::new(challenge.title, Tone::Accent).bold(),
        Styled::new(format!("  {}", challenge.difficulty.label()), difficulty_tone),
        Styled::new(format!("  {}", challenge.description), Tone::Normal),
        Styled::new(
            format!(
                "  challenge {}/{}  (PageUp: previous, PageDown: next)",
                deck.current + 1,
                deck.challenges.len()
            ),
            Tone::Accent,
        ),
    ]
}

fn help_lines(sheet: &HelpSheet) -> Vec<Styled> {
    let mut lines = vec![Styled::new(sheet.heading, Tone::Accent).bold()];
    lines.extend(sheet.commands.iter().map(|command| {
        Styled::new(
            format!("• {:<5} - {}", command.name, command.description),
            Tone::Normal,
        )
    }));
    lines.push(Styled::new(sheet.hint, Tone::Highlight));
    lines.push(Styled::new("", Tone::Normal));
    lines.push(Styled::new(sheet.tree_heading, Tone::Accent).bold());
    lines.extend(tree_lines(&sheet.tree, false));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use slicedterm_core::{Interpreter, Namespace, StudioContent};

    fn render(line: &str) -> Vec<String> {
        let namespace = Namespace::studio();
        let execution = Interpreter::new(&namespace, &StudioContent).execute(line);
        let record = execution.record.expect("record");
        Renderer::plain().record("~", &record)
    }

    #[test]
    fn prompt_line_leads_every_record() {
        assert_eq!(render("ls")[0], "~ $ ls");
    }

    #[test]
    fn listing_marks_directories() {
        let lines = render("ls");
        assert_eq!(lines[1], "[file] about");
        assert_eq!(lines[2], "[dir]  projects");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn help_lists_commands_then_tree_without_root() {
        let lines = render("help");
        assert_eq!(lines[1], "Available Commands:");
        assert_eq!(lines[2], "• ls    - List directories and files");
        assert!(lines.contains(&"Directory Structure:".to_owned()));
        assert!(!lines.contains(&".".to_owned()));
        assert!(lines.contains(&"    └── tutorials".to_owned()));
    }

    #[test]
    fn profile_facts_use_arrows() {
        let lines = render("cd contact");
        assert_eq!(lines[1], "Contact Information");
        assert!(lines.contains(&"→ Email: hello@slicedlabs.dev".to_owned()));
    }

    #[test]
    fn blog_cards_carry_dates() {
        let lines = render("cd blog");
        assert!(lines.contains(&"  March 15, 2024".to_owned()));
    }

    #[test]
    fn challenges_show_position() {
        let lines = render("cd challenges");
        assert_eq!(lines[1], "FizzBuzz");
        assert!(lines.last().unwrap().contains("challenge 1/3"));
    }

    #[test]
    fn cleared_bare_cd_renders_prompt_only() {
        assert_eq!(render("cd"), ["~ $ cd"]);
    }

    #[test]
    fn errors_render_message() {
        assert_eq!(render("cd nope"), ["~ $ cd nope", "Directory not found"]);
    }

    #[test]
    fn colour_wraps_text_in_escapes() {
        let renderer = Renderer::new(true, "$");
        let line = renderer.prompt("~", "ls");
        assert!(line.contains("\u{1b}["));
        assert!(line.contains("ls"));
    }
}
