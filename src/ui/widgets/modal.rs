//! Generic modal shell drawn over the current page

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};

pub struct Modal<'a> {
    title: &'a str,
    body: Vec<Line<'a>>,
    percent_x: u16,
    percent_y: u16,
}

impl<'a> Modal<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            body: Vec::new(),
            percent_x: 60,
            percent_y: 40,
        }
    }

    pub fn body(mut self, body: Vec<Line<'a>>) -> Self {
        self.body = body;
        self
    }

    pub fn size(mut self, percent_x: u16, percent_y: u16) -> Self {
        self.percent_x = percent_x.min(100);
        self.percent_y = percent_y.min(100);
        self
    }
}

impl<'a> Widget for Modal<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(self.percent_x, self.percent_y, area);
        Clear.render(popup, buf);

        let mut lines = vec![
            Line::styled(self.title, Style::default().add_modifier(Modifier::BOLD)),
            Line::from(""),
        ];
        lines.extend(self.body);
        lines.push(Line::from(""));
        lines.push(Line::styled(
            "Esc/Enter fechar",
            Style::default().fg(Color::DarkGray),
        ));

        Paragraph::new(Text::from(lines))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::LightBlue)),
            )
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true })
            .render(popup, buf);
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
