//! Sidebar - logo, navigation, finished-orders card and profile
//!
//! On wide terminals the sidebar is a fixed column. On narrow ones it
//! collapses behind a menu toggle and opens as an overlay.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::config::ProfileConfig;
use crate::core::{Action, Context, Module, Route};
use crate::domain::{Order, OrderStatus};
use crate::ui::widgets::ProgressBar;

pub const LOGO: &str = "▲ Delliv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub title: &'static str,
    pub route: Route,
}

pub const MAIN_NAV: [NavItem; 1] = [NavItem {
    title: "Pedidos",
    route: Route::Orders,
}];

pub const SECONDARY_NAV: [NavItem; 2] = [
    NavItem {
        title: "Contato",
        route: Route::Contact,
    },
    NavItem {
        title: "Configurações",
        route: Route::Settings,
    },
];

#[derive(Debug, Default)]
pub struct Sidebar {
    open: bool,
    cursor: usize,
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn items() -> impl Iterator<Item = NavItem> {
        MAIN_NAV.into_iter().chain(SECONDARY_NAV)
    }

    /// Point the cursor at the entry for `route`
    pub fn sync_route(&mut self, route: Route) {
        if let Some(idx) = Self::items().position(|item| item.route == route) {
            self.cursor = idx;
        }
    }

    fn item_count() -> usize {
        MAIN_NAV.len() + SECONDARY_NAV.len()
    }
}

impl Module for Sidebar {
    fn handle_key(&mut self, key: KeyEvent, _ctx: &Context<'_>) -> Action {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < Self::item_count() {
                    self.cursor += 1;
                }
                Action::None
            }
            KeyCode::Enter => match Self::items().nth(self.cursor) {
                Some(item) => Action::Navigate(item.route),
                None => Action::None,
            },
            _ => Action::None,
        }
    }
}

/// Share of finished orders among `orders`, None when there are none
pub fn finished_ratio(orders: &[Order]) -> Option<f64> {
    if orders.is_empty() {
        return None;
    }
    let done = orders
        .iter()
        .filter(|order| order.status == OrderStatus::Done)
        .count();
    Some(done as f64 / orders.len() as f64)
}

pub fn render(
    f: &mut Frame,
    area: Rect,
    sidebar: &Sidebar,
    route: Route,
    orders: &[Order],
    profile: &ProfileConfig,
    focused: bool,
) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(MAIN_NAV.len() as u16),
            Constraint::Length(SECONDARY_NAV.len() as u16 + 1),
            Constraint::Length(6),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(inner);

    let logo = Paragraph::new(Line::from(Span::styled(
        LOGO,
        Style::default()
            .fg(Color::LightBlue)
            .add_modifier(Modifier::BOLD),
    )));
    f.render_widget(logo, chunks[0]);

    draw_nav(f, chunks[1], &MAIN_NAV, 0, sidebar, route, focused);
    draw_nav(f, chunks[2], &SECONDARY_NAV, MAIN_NAV.len(), sidebar, route, focused);
    draw_finished_card(f, chunks[3], orders);

    let divider = Paragraph::new("─".repeat(chunks[4].width as usize))
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(divider, chunks[4]);

    draw_profile(f, chunks[5], profile);
}

fn draw_nav(
    f: &mut Frame,
    area: Rect,
    items: &[NavItem],
    offset: usize,
    sidebar: &Sidebar,
    route: Route,
    focused: bool,
) {
    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let style = if item.route == route {
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(item.title)).style(style)
        })
        .collect();

    let list = List::new(list_items)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    let cursor = sidebar.cursor();
    if focused && cursor >= offset && cursor < offset + items.len() {
        state.select(Some(cursor - offset));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_finished_card(f: &mut Frame, area: Rect, orders: &[Order]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let ratio = finished_ratio(orders);
    let summary = match ratio {
        Some(ratio) => format!(
            "Nossa média de pedidos finalizados é de {:.0}%",
            ratio * 100.0
        ),
        None => "Sem pedidos para calcular a média".to_string(),
    };

    let text = Text::from(vec![
        Line::styled(
            "Pedidos finalizados",
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(summary),
    ]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), chunks[0]);
    f.render_widget(
        ProgressBar::new(ratio.unwrap_or(0.0)).filled_style(Style::default().fg(Color::LightBlue)),
        chunks[1],
    );
}

fn draw_profile(f: &mut Frame, area: Rect, profile: &ProfileConfig) {
    let mut lines = vec![Line::from(vec![
        Span::styled("◉ ", Style::default().fg(Color::LightBlue)),
        Span::styled(
            profile.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])];
    if !profile.email.is_empty() {
        lines.push(Line::styled(
            format!("  {}", profile.email),
            Style::default().fg(Color::DarkGray),
        ));
    }
    f.render_widget(Paragraph::new(Text::from(lines)), area);
}
