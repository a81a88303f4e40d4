use ratatui::style::{Color, Modifier, Style};

// Centralized styles. Components ask for a role, not a color, so the palette
// can change in one place.

pub fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    }
}

pub fn title(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    }
}

/// Cursor row of a list whose window holds focus.
pub fn focused_highlight() -> Style {
    Style::default().fg(Color::Black).bg(Color::Green)
}

/// Cursor row of a list whose window does not hold focus.
pub fn unfocused_highlight() -> Style {
    Style::default().fg(Color::Black).bg(Color::Gray)
}

pub fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn scroll_bar() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn prompt() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}
