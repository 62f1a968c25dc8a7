// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Studio copy and the content resolver used by `cd`.
// Author: Lukas Bower

//! Studio copy and the content resolver used by `cd`.

use alloc::string::ToString;

use crate::error::TerminalError;
use crate::payload::{
    Card, Challenge, ChallengeDeck, ContentPayload, Detail, Difficulty, Fact, Profile, StyledText,
    Tone,
};

/// Source of topic pages. Returning `None` means the topic is unknown.
pub trait ContentProvider {
    /// Page shown when entering a directory.
    fn directory(&self, name: &str) -> Option<ContentPayload>;

    /// Page shown when opening a file.
    fn file(&self, name: &str) -> Option<ContentPayload>;
}

/// Resolve a directory page, degrading unknown names to `ErrorText`.
pub fn resolve_directory(provider: &dyn ContentProvider, name: &str) -> ContentPayload {
    provider
        .directory(name)
        .unwrap_or_else(|| TerminalError::DirectoryNotFound(name.to_string()).into())
}

/// Resolve a file page, degrading unknown names to `ErrorText`.
pub fn resolve_file(provider: &dyn ContentProvider, name: &str) -> ContentPayload {
    provider
        .file(name)
        .unwrap_or_else(|| TerminalError::FileNotFound(name.to_string()).into())
}

/// ASCII banner printed when a session starts.
pub const BANNER: &str = r"
 ███████ ██      ██  ██████ ███████ ██████      ██       █████  ██████  ███████
 ██      ██      ██ ██      ██      ██   ██     ██      ██   ██ ██   ██ ██
 ███████ ██      ██ ██      █████   ██   ██     ██      ███████ ██████  ███████
      ██ ██      ██ ██      ██      ██   ██     ██      ██   ██ ██   ██      ██
 ███████ ███████ ██  ██████ ███████ ██████      ███████ ██   ██ ██████  ███████
";

/// Greeting printed under the banner.
pub const WELCOME: &str =
    "Welcome to Sliced Labs Terminal Interface. Type 'help' for available commands.";

/// Easter egg hint printed under the greeting.
pub const EASTER_EGG_HINT: &str = "Hint: There might be some hidden easter eggs... Try 'matrix', 'coffee', 'hack', or the legendary Konami code!";

/// Window title of the terminal.
pub const TITLE: &str = "SLICED-LABS-TERMINAL";

/// `matrix` output, also shown full-screen while the overlay is active.
pub const MATRIX: StyledText = StyledText {
    text: "Wake up, Neo...\nThe Matrix has you...\nFollow the white rabbit.\nKnock, knock, Neo.",
    tone: Tone::Success,
    animated: true,
};

/// `coffee` output.
pub const COFFEE: StyledText = StyledText {
    text: "       )  (\n      (   ) )\n       ) ( (\n     _______)_\n  .-'---------|\n  ( C|======| |\n   '-.________|\n    '-------'",
    tone: Tone::Accent,
    animated: false,
};

/// `hack` output.
pub const HACK: StyledText = StyledText {
    text: "ACCESS GRANTED\nSYSTEM COMPROMISED\nWELCOME TO THE MAINFRAME",
    tone: Tone::Alert,
    animated: true,
};

/// Pseudo-input recorded for the secret sequence reveal.
pub const KONAMI_INPUT: &str = "KONAMI CODE ACTIVATED";

/// Secret sequence reveal output.
pub const KONAMI_REVEAL: StyledText = StyledText {
    text: "↑↑↓↓←→←→BA\nCongratulations! You've unlocked the secret code!",
    tone: Tone::Accent,
    animated: true,
};

const PROJECT_CARDS: &[Card] = &[
    Card {
        title: "Web Applications",
        summary: "Enterprise-grade web solutions built with cutting-edge technology",
        tags: &["React", "Node.js"],
        date: None,
    },
    Card {
        title: "Mobile Applications",
        summary: "Cross-platform mobile apps for iOS and Android",
        tags: &["React Native", "Flutter"],
        date: None,
    },
    Card {
        title: "Blockchain Solutions",
        summary: "Web3 applications and smart contracts",
        tags: &["Ethereum", "Solidity"],
        date: None,
    },
];

const SERVICE_CARDS: &[Card] = &[
    Card {
        title: "Technical Consulting",
        summary: "Expert guidance on architecture and technology choices",
        tags: &[],
        date: None,
    },
    Card {
        title: "Custom Development",
        summary: "Full-stack development services for web and mobile",
        tags: &[],
        date: None,
    },
    Card {
        title: "UI/UX Design",
        summary: "User-centered design solutions",
        tags: &[],
        date: None,
    },
];

const BLOG_CARDS: &[Card] = &[
    Card {
        title: "Tech Insights",
        summary: "Latest trends and technology analysis",
        tags: &[],
        date: Some("March 15, 2024"),
    },
    Card {
        title: "Case Studies",
        summary: "Real-world project implementations",
        tags: &[],
        date: Some("March 10, 2024"),
    },
];

/// Coding challenges shown by `cd challenges`.
pub const CHALLENGES: &[Challenge] = &[
    Challenge {
        title: "FizzBuzz",
        description: "Write a program that prints numbers from 1 to 100. For multiples of 3, print 'Fizz'. For multiples of 5, print 'Buzz'. For numbers that are multiples of both 3 and 5, print 'FizzBuzz'.",
        difficulty: Difficulty::Easy,
    },
    Challenge {
        title: "Palindrome Check",
        description: "Write a function that checks if a given string is a palindrome (reads the same forwards and backwards).",
        difficulty: Difficulty::Easy,
    },
    Challenge {
        title: "Binary Search",
        description: "Implement a binary search algorithm to find a target number in a sorted array.",
        difficulty: Difficulty::Medium,
    },
];

const ABOUT: Profile = Profile {
    heading: "About Sliced Labs",
    body: Some("Sliced Labs is a cutting-edge software development studio specializing in creating exceptional digital experiences. We combine technical expertise with creative innovation to deliver solutions that drive business growth."),
    facts: &[
        Fact {
            label: "Founded",
            value: "2024",
        },
        Fact {
            label: "Focus",
            value: "Web, Mobile, and Blockchain Development",
        },
        Fact {
            label: "Mission",
            value: "Crafting Digital Excellence",
        },
    ],
};

const CONTACT: Profile = Profile {
    heading: "Contact Information",
    body: None,
    facts: &[
        Fact {
            label: "Email",
            value: "hello@slicedlabs.dev",
        },
        Fact {
            label: "Location",
            value: "Silicon Valley",
        },
        Fact {
            label: "Hours",
            value: "Mon-Fri, 9:00-18:00 PST",
        },
    ],
};

/// Built-in studio copy.
#[derive(Clone, Copy, Debug, Default)]
pub struct StudioContent;

impl ContentProvider for StudioContent {
    fn directory(&self, name: &str) -> Option<ContentPayload> {
        let detail = match name {
            "projects" => Detail::Cards {
                cards: PROJECT_CARDS,
            },
            "services" => Detail::Cards {
                cards: SERVICE_CARDS,
            },
            "blog" => Detail::Cards { cards: BLOG_CARDS },
            "challenges" => Detail::Challenges(ChallengeDeck {
                challenges: CHALLENGES,
                current: 0,
            }),
            _ => return None,
        };
        Some(ContentPayload::Detail(detail))
    }

    fn file(&self, name: &str) -> Option<ContentPayload> {
        match name {
            "about" => Some(ContentPayload::Detail(Detail::Profile(ABOUT))),
            "contact" => Some(ContentPayload::Detail(Detail::Profile(CONTACT))),
            _ => None,
        }
    }
}
