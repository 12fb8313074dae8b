//! Order list controller

use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

use crate::core::{Action, Context, Module};
use crate::domain::{Order, StatusFilter};
use crate::modules::export::ExportFormat;
use crate::store::OrderSnapshot;

/// Request for the store to fetch orders for a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchIntent {
    pub filter: StatusFilter,
}

/// Which body the page shows. Exactly one applies at a time, checked in
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListDisplay<'a> {
    Loading,
    Error(&'a str),
    Table(&'a [Order]),
    Empty,
}

impl<'a> ListDisplay<'a> {
    pub fn from_snapshot(snapshot: &'a OrderSnapshot) -> Self {
        if snapshot.loading {
            return ListDisplay::Loading;
        }
        if let Some(error) = snapshot.error.as_deref().filter(|e| !e.is_empty()) {
            return ListDisplay::Error(error);
        }
        if snapshot.orders.is_empty() {
            ListDisplay::Empty
        } else {
            ListDisplay::Table(&snapshot.orders)
        }
    }
}

#[derive(Debug, Default)]
pub struct OrderListController {
    filter: StatusFilter,
    selected_order_id: Option<u64>,
    cursor: usize,
    modal_open: bool,
    mounted: bool,
}

impl OrderListController {
    pub fn new() -> Self {
        Self::default()
    }

    /// First fetch when the page comes up. Only the first call yields an intent.
    pub fn mount(&mut self) -> Option<FetchIntent> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        Some(FetchIntent {
            filter: self.filter,
        })
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    /// Change the filter. Yields a fetch only when the value actually changed.
    pub fn set_filter(&mut self, filter: StatusFilter) -> Option<FetchIntent> {
        if filter == self.filter {
            return None;
        }
        debug!(from = self.filter.as_query(), to = filter.as_query(), "filter changed");
        self.filter = filter;
        self.cursor = 0;
        Some(FetchIntent { filter })
    }

    /// Same as [`set_filter`](Self::set_filter) for a raw selector value.
    /// Values outside the allowed set select "all".
    pub fn set_filter_raw(&mut self, raw: &str) -> Option<FetchIntent> {
        self.set_filter(StatusFilter::parse(raw))
    }

    /// Manual retry of the current filter
    pub fn refresh(&self) -> FetchIntent {
        FetchIntent {
            filter: self.filter,
        }
    }

    /// Remember which order the user acted on. Nothing consumes this yet.
    pub fn select_order(&mut self, order: &Order) {
        debug!(order_id = order.id, customer = %order.customer, "order selected");
        self.selected_order_id = Some(order.id);
    }

    pub fn selected_order_id(&self) -> Option<u64> {
        self.selected_order_id
    }

    pub fn display<'a>(&self, snapshot: &'a OrderSnapshot) -> ListDisplay<'a> {
        ListDisplay::from_snapshot(snapshot)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self, len: usize) {
        if len > 0 && self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn go_to_top(&mut self) {
        self.cursor = 0;
    }

    pub fn go_to_bottom(&mut self, len: usize) {
        self.cursor = len.saturating_sub(1);
    }

    /// Keep the cursor inside a list that may have shrunk after a fetch
    pub fn clamp_cursor(&mut self, len: usize) {
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    /// Row action ("Prosseguir"): select the row under the cursor and open the modal
    pub fn invoke_row_action(&mut self, snapshot: &OrderSnapshot) -> bool {
        let ListDisplay::Table(orders) = self.display(snapshot) else {
            return false;
        };
        let Some(order) = orders.get(self.cursor) else {
            return false;
        };
        self.select_order(order);
        self.modal_open = true;
        true
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn close_modal(&mut self) {
        self.modal_open = false;
    }

    fn filter_action(&mut self, filter: StatusFilter) -> Action {
        match self.set_filter(filter) {
            Some(intent) => Action::Fetch(intent),
            None => Action::None,
        }
    }
}

impl Module for OrderListController {
    fn handle_key(&mut self, key: KeyEvent, ctx: &Context<'_>) -> Action {
        if self.modal_open {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.close_modal();
            }
            return Action::None;
        }

        let rows = match self.display(ctx.orders) {
            ListDisplay::Table(orders) => orders.len(),
            _ => 0,
        };

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(rows),
            KeyCode::Home | KeyCode::Char('g') => self.go_to_top(),
            KeyCode::End | KeyCode::Char('G') => self.go_to_bottom(rows),
            KeyCode::Enter | KeyCode::Char('p') => {
                self.invoke_row_action(ctx.orders);
            }
            KeyCode::Char('f') | KeyCode::Right => return self.filter_action(self.filter.next()),
            KeyCode::Char('F') | KeyCode::Left => return self.filter_action(self.filter.prev()),
            KeyCode::Char(ch @ '0'..='4') => {
                let idx = ch as usize - '0' as usize;
                return self.filter_action(StatusFilter::ALL[idx]);
            }
            KeyCode::Char('r') => return Action::Fetch(self.refresh()),
            KeyCode::Char('e') => return Action::Export(ExportFormat::Csv),
            KeyCode::Char('E') => return Action::Export(ExportFormat::Json),
            _ => {}
        }
        Action::None
    }
}
