//! User interaction the admin controller needs from its UI layer.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

pub trait Prompt {
    /// Ask a yes/no question. Anything but an explicit yes is a no.
    fn confirm(&mut self, message: &str) -> bool;

    /// Show a message the user has to acknowledge.
    fn alert(&mut self, message: &str);
}

/// Prompt on a line-oriented terminal.
pub struct TerminalPrompt<I, O> {
    input: I,
    output: O,
    /// Answer every confirmation with yes without asking
    assume_yes: bool,
}

impl<I: BufRead, O: Write> TerminalPrompt<I, O> {
    pub fn new(input: I, output: O, assume_yes: bool) -> Self {
        Self {
            input,
            output,
            assume_yes,
        }
    }
}

impl<I: BufRead, O: Write> Prompt for TerminalPrompt<I, O> {
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let _ = write!(self.output, "{} [y/N] ", message);
        let _ = self.output.flush();

        let mut answer = String::new();
        if self.input.read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }

    fn alert(&mut self, message: &str) {
        let _ = writeln!(self.output, "{}", message);
    }
}

/// Scripted prompt that answers from a queue and keeps every alert.
#[derive(Debug, Default)]
pub struct RecordingPrompt {
    answers: VecDeque<bool>,
    pub confirmations: Vec<String>,
    pub alerts: Vec<String>,
}

impl RecordingPrompt {
    /// Answer confirmations with `answers` in order, then with no.
    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Default::default()
        }
    }
}

impl Prompt for RecordingPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations.push(message.to_string());
        self.answers.pop_front().unwrap_or(false)
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
