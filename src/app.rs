use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{error, info};

use crate::config::{ContactConfig, ProfileConfig};
use crate::core::{parse_command, Action, Command, Context, Module, NotifyLevel, Route};
use crate::domain::Order;
use crate::infrastructure::RuntimeEvent;
use crate::modules::export::export_orders;
use crate::modules::orders::{FetchIntent, ListDisplay, OrderListController};
use crate::modules::sidebar::Sidebar;
use crate::store::{FetchRequest, OrderSnapshot, OrderStore};

/// Terminal width from which the sidebar is a permanent column
pub const WIDE_LAYOUT_MIN_WIDTH: u16 = 100;

const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: NotifyLevel,
    pub since: Instant,
}

/// Things the app shows but never changes
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub endpoint: String,
    pub profile: ProfileConfig,
    pub contact: ContactConfig,
    pub config_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub export_dir: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            profile: ProfileConfig::default(),
            contact: ContactConfig::default(),
            config_path: None,
            log_path: None,
            export_dir: PathBuf::from("exports"),
        }
    }
}

pub struct App {
    pub route: Route,
    pub focus: Focus,
    pub input_mode: InputMode,
    pub command_input: String,
    pub orders: OrderListController,
    pub sidebar: Sidebar,
    pub help_open: bool,
    pub should_quit: bool,
    /// Updated by the renderer from the terminal width
    pub wide: bool,
    pub settings: AppSettings,
    store: OrderStore,
    pending_requests: Vec<FetchRequest>,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            route: Route::Orders,
            focus: Focus::Content,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            orders: OrderListController::new(),
            sidebar: Sidebar::new(),
            help_open: false,
            should_quit: false,
            wide: true,
            settings,
            store: OrderStore::new(),
            pending_requests: Vec::new(),
            status: None,
        }
    }

    /// Bring the orders page up; queues the first fetch
    pub fn mount(&mut self) {
        if let Some(intent) = self.orders.mount() {
            self.apply_action(Action::Fetch(intent));
        }
    }

    pub fn snapshot(&self) -> &OrderSnapshot {
        self.store.snapshot()
    }

    /// Fetches dispatched since the last call, oldest first
    pub fn take_fetch_requests(&mut self) -> Vec<FetchRequest> {
        std::mem::take(&mut self.pending_requests)
    }

    pub fn apply_runtime_event(&mut self, event: RuntimeEvent) {
        match event {
            RuntimeEvent::Ready { endpoint } => {
                info!(%endpoint, "order source ready");
                self.settings.endpoint = endpoint;
            }
            RuntimeEvent::OrdersLoaded {
                request_id, orders, ..
            } => {
                let len = orders.len();
                if self.store.resolve(request_id, orders) {
                    self.orders.clamp_cursor(len);
                }
            }
            RuntimeEvent::OrdersFailed {
                request_id,
                message,
                ..
            } => {
                self.store.reject(request_id, message);
            }
            RuntimeEvent::Error { message } => {
                error!(%message, "runtime error");
                self.set_status(message, NotifyLevel::Error);
            }
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: NotifyLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, NotifyLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
    }

    pub fn focus_label(&self) -> &'static str {
        if self.input_mode == InputMode::Command {
            return "Comando";
        }
        if self.sidebar_active() {
            "Menu"
        } else {
            self.route.title()
        }
    }

    /// Whether keys go to the sidebar rather than the page
    pub fn sidebar_active(&self) -> bool {
        if self.wide {
            self.focus == Focus::Sidebar
        } else {
            self.sidebar.is_open()
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Command => self.handle_command_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        if self.help_open {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.help_open = false;
            }
            return;
        }

        // The modal swallows every key until it is closed
        if self.orders.modal_open() {
            let ctx = Context {
                orders: self.store.snapshot(),
            };
            let action = self.orders.handle_key(key, &ctx);
            self.apply_action(action);
            return;
        }

        let action = match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('?') => Action::ToggleHelp,
            KeyCode::Char(':') | KeyCode::Char('/') => Action::OpenCommand(None),
            KeyCode::Char('m') => Action::ToggleMenu,
            KeyCode::Tab => Action::ToggleMenu,
            KeyCode::Esc => {
                if !self.wide && self.sidebar.is_open() {
                    self.sidebar.close();
                } else if self.focus == Focus::Sidebar {
                    self.focus = Focus::Content;
                }
                Action::None
            }
            _ => {
                let ctx = Context {
                    orders: self.store.snapshot(),
                };
                if self.sidebar_active() {
                    self.sidebar.handle_key(key, &ctx)
                } else if self.route == Route::Orders {
                    self.orders.handle_key(key, &ctx)
                } else {
                    Action::None
                }
            }
        };
        self.apply_action(action);
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.exit_command(),
            KeyCode::Enter => self.apply_command(),
            KeyCode::Backspace => {
                self.command_input.pop();
            }
            KeyCode::Char(ch) => self.command_input.push(ch),
            _ => {}
        }
    }

    pub fn enter_command(&mut self, prefix: Option<String>) {
        self.input_mode = InputMode::Command;
        self.command_input = prefix.unwrap_or_default();
    }

    pub fn exit_command(&mut self) {
        self.input_mode = InputMode::Normal;
        self.command_input.clear();
    }

    pub fn apply_command(&mut self) {
        let input = self.command_input.trim().to_string();
        self.exit_command();
        if input.is_empty() {
            return;
        }
        let cmd = parse_command(&input);
        let action = self.execute_command(&cmd);
        self.apply_action(action);
    }

    pub fn execute_command(&mut self, cmd: &Command) -> Action {
        match cmd {
            Command::Filter(filter) => {
                self.navigate(Route::Orders);
                match self.orders.set_filter(*filter) {
                    Some(intent) => Action::Fetch(intent),
                    None => Action::Notify(
                        format!("Filtro {} já aplicado", filter.label()),
                        NotifyLevel::Info,
                    ),
                }
            }
            Command::Refresh => Action::Fetch(self.orders.refresh()),
            Command::Export(format) => Action::Export(*format),
            Command::Go(route) => Action::Navigate(*route),
            Command::Menu => Action::ToggleMenu,
            Command::Help => Action::ToggleHelp,
            Command::Quit => Action::Quit,
            Command::Unknown(input) => Action::Notify(
                format!("Comando desconhecido: {input}"),
                NotifyLevel::Error,
            ),
        }
    }

    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Fetch(FetchIntent { filter }) => {
                let request = self.store.dispatch(filter);
                self.pending_requests.push(request);
            }
            Action::Navigate(route) => self.navigate(route),
            Action::Export(format) => {
                let orders: &[Order] = match ListDisplay::from_snapshot(self.store.snapshot()) {
                    ListDisplay::Table(orders) => orders,
                    _ => &[],
                };
                let outcome = export_orders(orders, format, &self.settings.export_dir);
                self.apply_action(outcome);
            }
            Action::Notify(msg, level) => self.set_status(msg, level),
            Action::OpenCommand(prefix) => self.enter_command(prefix),
            Action::ToggleMenu => {
                if self.wide {
                    self.focus = match self.focus {
                        Focus::Sidebar => Focus::Content,
                        Focus::Content => Focus::Sidebar,
                    };
                    if self.focus == Focus::Sidebar {
                        self.sidebar.sync_route(self.route);
                    }
                } else {
                    self.sidebar.toggle();
                    if self.sidebar.is_open() {
                        self.sidebar.sync_route(self.route);
                    }
                }
            }
            Action::ToggleHelp => self.help_open = !self.help_open,
            Action::Quit => self.should_quit = true,
        }
    }

    fn navigate(&mut self, route: Route) {
        self.route = route;
        self.sidebar.sync_route(route);
        self.sidebar.close();
        self.focus = Focus::Content;
    }
}
