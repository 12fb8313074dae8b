use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::WIDE_LAYOUT_MIN_WIDTH;

const SIDEBAR_WIDTH: u16 = 30;
const TOP_BAR_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub wide: bool,
    /// Fixed sidebar column, wide layout only
    pub sidebar: Option<Rect>,
    /// Logo and menu toggle, narrow layout only
    pub top_bar: Option<Rect>,
    /// Where the sidebar opens over the page on narrow terminals
    pub overlay: Rect,
    pub page: Rect,
    pub status_line: Rect,
    pub command_line: Rect,
}

pub fn is_wide(size: Rect) -> bool {
    size.width >= WIDE_LAYOUT_MIN_WIDTH
}

pub fn areas(size: Rect) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size);
    let body = vertical[0];

    if is_wide(size) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(body);
        return UiAreas {
            size,
            wide: true,
            sidebar: Some(columns[0]),
            top_bar: None,
            overlay: columns[0],
            page: columns[1],
            status_line: vertical[1],
            command_line: vertical[2],
        };
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(TOP_BAR_HEIGHT), Constraint::Min(0)])
        .split(body);
    let overlay = Rect {
        width: SIDEBAR_WIDTH.min(rows[1].width),
        ..rows[1]
    };

    UiAreas {
        size,
        wide: false,
        sidebar: None,
        top_bar: Some(rows[0]),
        overlay,
        page: rows[1],
        status_line: vertical[1],
        command_line: vertical[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_layout_has_sidebar_column() {
        let areas = areas(Rect::new(0, 0, 120, 40));
        assert!(areas.wide);
        assert_eq!(areas.sidebar.map(|r| r.width), Some(SIDEBAR_WIDTH));
        assert!(areas.top_bar.is_none());
        assert_eq!(areas.page.width, 120 - SIDEBAR_WIDTH);
        assert_eq!(areas.command_line.y, 39);
    }

    #[test]
    fn test_narrow_layout_collapses_to_top_bar() {
        let areas = areas(Rect::new(0, 0, 80, 30));
        assert!(!areas.wide);
        assert!(areas.sidebar.is_none());
        assert_eq!(areas.top_bar.map(|r| r.height), Some(TOP_BAR_HEIGHT));
        assert_eq!(areas.page.y, TOP_BAR_HEIGHT);
        assert_eq!(areas.overlay.y, areas.page.y);
        assert_eq!(areas.overlay.width, SIDEBAR_WIDTH);
    }
}
