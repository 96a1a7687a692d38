//! Transcript-mode theme and styling.

use colored::Colorize;
use replay_core::{Prediction, Speaker};

/// Transcript styling.
pub(crate) struct Theme;

impl Theme {
    /// Format a header.
    pub(crate) fn header(text: &str) -> String {
        format!("{}", text.bold().cyan())
    }

    /// Format a dimmed message.
    pub(crate) fn dimmed(text: &str) -> String {
        format!("{}", text.dimmed())
    }

    /// Format a warning message.
    pub(crate) fn warning(text: &str) -> String {
        format!("{} {}", "!".yellow(), text.yellow())
    }

    /// Format a speaker label for a chat line.
    pub(crate) fn speaker(speaker: Speaker) -> String {
        match speaker {
            Speaker::Customer => format!("{}", speaker.label().bold().green()),
            Speaker::Agent => format!("{}", speaker.label().bold().magenta()),
        }
    }

    /// Format a section heading inside a thinking payload.
    pub(crate) fn section_heading(text: &str) -> String {
        format!("{}", text.bold())
    }

    /// Format a separator line.
    pub(crate) fn separator() -> String {
        "━".repeat(50).dimmed().to_string()
    }

    /// Format a prediction score as a bar plus percentage.
    pub(crate) fn score_bar(prediction: &Prediction) -> String {
        let filled = usize::from(prediction.score.min(100)) / 5;
        let empty = 20usize.saturating_sub(filled);
        let bar = format!("[{}{}] {:>3}%", "█".repeat(filled), "░".repeat(empty), prediction.score);
        if prediction.is_high_score() {
            bar.green().to_string()
        } else {
            bar.dimmed().to_string()
        }
    }
}
