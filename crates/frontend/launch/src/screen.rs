//! What the launch page shows.

use romsite_core::Rom;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// No identifier on this page (the index/listing page)
    Idle,
    /// Waiting on the API or on the emulator injection delay
    Loading,
    /// Play and Help actions for a resolved ROM
    GameStart { rom: Rom },
    /// Usage instructions, with a way back to the start screen
    Help { rom: Rom },
    /// Leaving the page for a tag's resource
    Redirecting { target: String },
    NotFound { message: String },
    Error { message: String },
    /// Player mount point is in place and the loader script inserted
    Player { mount_id: String },
}

impl Screen {
    /// The ROM this screen is about, if any
    pub fn rom(&self) -> Option<&Rom> {
        match self {
            Screen::GameStart { rom } | Screen::Help { rom } => Some(rom),
            _ => None,
        }
    }
}

pub struct HelpSection {
    pub heading: &'static str,
    pub body: &'static str,
}

pub const HELP_TITLE: &str = "How to play";

pub const HELP_SECTIONS: &[HelpSection] = &[
    HelpSection {
        heading: "To play",
        body: "Click \"Play\" to start the game in fullscreen automatically.",
    },
    HelpSection {
        heading: "Controls",
        body: "Use the keyboard arrows, or touch the screen on mobile.",
    },
    HelpSection {
        heading: "Compatibility",
        body: "Works on computers, tablets and smartphones.",
    },
];

pub fn not_found_message(identifier: &str) -> String {
    format!("Resource \"{}\" not found.", identifier)
}

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load game data.";
