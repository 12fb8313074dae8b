//! Command parser for the : command system

use crate::core::Route;
use crate::domain::StatusFilter;
use crate::modules::export::ExportFormat;

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Filter(StatusFilter),
    Refresh,
    Export(ExportFormat),
    Go(Route),
    Menu,
    Help,
    Quit,

    // Unknown command
    Unknown(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim().to_string());

    match cmd.to_lowercase().as_str() {
        // Unknown statuses fall back to "all", like the selector
        "filter" | "f" | "status" => {
            Command::Filter(StatusFilter::parse(args.as_deref().unwrap_or("")))
        }
        "refresh" | "reload" | "r" => Command::Refresh,
        "export" | "exp" => match args.as_deref().map(str::to_lowercase).as_deref() {
            None | Some("") | Some("csv") => Command::Export(ExportFormat::Csv),
            Some("json") => Command::Export(ExportFormat::Json),
            Some(_) => Command::Unknown(input.to_string()),
        },
        "orders" | "pedidos" => Command::Go(Route::Orders),
        "contact" | "contato" => Command::Go(Route::Contact),
        "settings" | "config" => Command::Go(Route::Settings),
        "go" => match args.as_deref().map(str::to_lowercase).as_deref() {
            Some("orders" | "pedidos") => Command::Go(Route::Orders),
            Some("contact" | "contato") => Command::Go(Route::Contact),
            Some("settings" | "config") => Command::Go(Route::Settings),
            _ => Command::Unknown(input.to_string()),
        },
        "menu" => Command::Menu,
        "help" | "h" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown(input.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_commands() {
        assert_eq!(parse_command("filter done"), Command::Filter(StatusFilter::Done));
        assert_eq!(parse_command("f progress"), Command::Filter(StatusFilter::Progress));
        assert_eq!(parse_command("filter"), Command::Filter(StatusFilter::All));
        assert_eq!(parse_command("filter all"), Command::Filter(StatusFilter::All));
        assert_eq!(parse_command("filter shipped"), Command::Filter(StatusFilter::All));
    }

    #[test]
    fn test_parse_export_commands() {
        assert_eq!(parse_command("export"), Command::Export(ExportFormat::Csv));
        assert_eq!(parse_command("export JSON"), Command::Export(ExportFormat::Json));
        assert_eq!(
            parse_command("export xml"),
            Command::Unknown("export xml".to_string())
        );
    }

    #[test]
    fn test_parse_navigation_commands() {
        assert_eq!(parse_command("contato"), Command::Go(Route::Contact));
        assert_eq!(parse_command("settings"), Command::Go(Route::Settings));
        assert_eq!(parse_command("  orders "), Command::Go(Route::Orders));
        assert_eq!(parse_command("go Contato"), Command::Go(Route::Contact));
        assert_eq!(parse_command("go nowhere"), Command::Unknown("go nowhere".to_string()));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse_command("refresh"), Command::Refresh);
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(
            parse_command("notacommand"),
            Command::Unknown("notacommand".to_string())
        );
    }
}
