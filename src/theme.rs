use crate::layout::Category;
use ratatui::style::{Color, Modifier, Style};

/// Header/status bar while the run is live
pub const HEADER: Style = Style::new().fg(Color::Black).bg(Color::Blue);
/// Header/status bar while paused
pub const HEADER_PAUSED: Style = Style::new().fg(Color::Black).bg(Color::White);

pub fn header(paused: bool) -> Style {
    if paused {
        HEADER_PAUSED
    } else {
        HEADER
    }
}

/// Fixed mapping from cell category to terminal style.
pub fn style(category: Category) -> Style {
    match category {
        Category::Ghost => Style::new().fg(Color::Gray).add_modifier(Modifier::DIM),
        Category::Correct => Style::new().fg(Color::Green),
        Category::Incorrect => Style::new().fg(Color::Red),
        Category::Missed => Style::new().fg(Color::Magenta),
        Category::Extra => Style::new().fg(Color::Yellow),
        Category::Cursor => Style::new().fg(Color::Black).bg(Color::White),
    }
}

/// Style for the counters block in the stats line, reversed like a badge.
pub fn counter(category: Category) -> Style {
    style(category).add_modifier(Modifier::REVERSED)
}
