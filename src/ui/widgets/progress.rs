//! Single-line progress bar

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

pub struct ProgressBar {
    ratio: f64,
    filled_style: Style,
    empty_style: Style,
}

impl ProgressBar {
    /// `ratio` is clamped to 0..=1
    pub fn new(ratio: f64) -> Self {
        Self {
            ratio: clamp_ratio(ratio),
            filled_style: Style::default().fg(Color::Blue),
            empty_style: Style::default().fg(Color::DarkGray),
        }
    }

    pub fn filled_style(mut self, style: Style) -> Self {
        self.filled_style = style;
        self
    }
}

impl Widget for ProgressBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let filled = filled_cells(self.ratio, area.width as usize);
        for i in 0..area.width {
            let x = area.x + i;
            let (ch, style) = if (i as usize) < filled {
                ('█', self.filled_style)
            } else {
                ('░', self.empty_style)
            };
            buf.get_mut(x, area.y).set_char(ch).set_style(style);
        }
    }
}

fn clamp_ratio(ratio: f64) -> f64 {
    if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    }
}

fn filled_cells(ratio: f64, width: usize) -> usize {
    ((ratio * width as f64).round() as usize).min(width)
}
