//! Actions that modules can return to communicate with the app

use crate::modules::export::ExportFormat;
use crate::modules::orders::FetchIntent;

/// Actions returned by modules to communicate state changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action needed
    None,

    /// Ask the order store for a fetch
    Fetch(FetchIntent),

    /// Switch the page shown next to the sidebar
    Navigate(Route),

    /// Write the displayed orders to disk
    Export(ExportFormat),

    /// Show notification in status bar
    Notify(String, NotifyLevel),

    /// Open command line with optional prefix
    OpenCommand(Option<String>),

    /// Expand or collapse the sidebar menu
    ToggleMenu,

    /// Toggle the key reference popup
    ToggleHelp,

    /// Request quit
    Quit,
}

/// Pages reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Orders,
    Contact,
    Settings,
}

impl Route {
    pub fn title(&self) -> &'static str {
        match self {
            Route::Orders => "Pedidos",
            Route::Contact => "Contato",
            Route::Settings => "Configurações",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Orders => "/orders",
            Route::Contact => "/contact",
            Route::Settings => "/settings",
        }
    }
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}
