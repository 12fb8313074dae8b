//! Module trait for extensible UI components

use crossterm::event::KeyEvent;

use super::Action;
use crate::store::OrderSnapshot;

/// What a module may look at while handling input
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub orders: &'a OrderSnapshot,
}

/// Trait for UI modules that can handle input
pub trait Module {
    /// Handle keyboard input
    /// Returns an Action describing what should happen
    fn handle_key(&mut self, key: KeyEvent, ctx: &Context<'_>) -> Action;
}
