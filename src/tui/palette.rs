//! Color palette used across scenes

use ratatui::style::{Color, Modifier, Style};

use crate::reports::UsageTier;

/// The small set of semantic colors the interface draws with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// Highlighted row or option
    Selection,
    /// Errors and high usage
    High,
    /// Medium usage and section headers
    Medium,
    /// Low usage
    Low,
    /// Titles and focused borders
    Title,
    /// Hints and placeholders
    Muted,
}

impl Palette {
    pub fn style(self) -> Style {
        match self {
            Palette::Selection => Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            Palette::High => Style::default().fg(Color::Red),
            Palette::Medium => Style::default().fg(Color::Yellow),
            Palette::Low => Style::default().fg(Color::Green),
            Palette::Title => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            Palette::Muted => Style::default().fg(Color::DarkGray),
        }
    }
}

impl From<UsageTier> for Palette {
    fn from(tier: UsageTier) -> Self {
        match tier {
            UsageTier::Low => Palette::Low,
            UsageTier::Medium => Palette::Medium,
            UsageTier::High => Palette::High,
        }
    }
}
