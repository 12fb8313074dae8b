use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::domain::StatusColor;

pub fn badge_style(color: StatusColor) -> Style {
    let bg = match color {
        StatusColor::Gray => Color::Gray,
        StatusColor::Green => Color::LightGreen,
        StatusColor::Red => Color::LightRed,
        StatusColor::Blue => Color::LightBlue,
    };
    Style::default()
        .fg(Color::Black)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

/// Rounded-looking pill with the translated status
pub fn status_badge(label: &str, color: StatusColor) -> Span<'static> {
    Span::styled(format!(" {label} "), badge_style(color))
}
