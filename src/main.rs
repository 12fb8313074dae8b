use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use delliv::app::{App, AppSettings};
use delliv::config::{self, Config};
use delliv::infrastructure::api::normalize_base_url;
use delliv::infrastructure::{RuntimeBridge, RuntimeCommand, RuntimeEvent, SourceConfig};
use delliv::ui;

#[derive(Debug, Parser)]
#[command(
    name = "delliv",
    version,
    about = "Delliv: order tracking dashboard for the terminal"
)]
struct Args {
    /// Orders API base URL (e.g. http://localhost:3333)
    #[arg(long, conflicts_with_all = ["fixture", "demo"])]
    api: Option<String>,

    /// JSON file with an array of orders
    #[arg(long, conflicts_with = "demo")]
    fixture: Option<PathBuf>,

    /// Use the built-in demo orders
    #[arg(long)]
    demo: bool,

    /// Config file (defaults to ~/.config/delliv/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level or filter directive (e.g. debug, delliv=trace)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = config::load(args.config.as_deref())?;
    let log_path = config::log_path(&config);
    let level = args
        .log_level
        .clone()
        .or_else(|| config.log.level.clone())
        .unwrap_or_else(|| "info".to_string());
    if let Some(path) = log_path.as_deref() {
        if let Err(err) = setup_tracing(&level, path) {
            eprintln!("logging disabled: {err:#}");
        }
    }

    let source = source_from_args_and_config(&args, &config);
    info!(source = %source.display(), "starting delliv");

    let settings = AppSettings {
        endpoint: source.display(),
        profile: config.profile.clone(),
        contact: config.contact.clone(),
        config_path: args.config.clone().or_else(config::config_path),
        log_path,
        export_dir: config::export_dir(),
    };

    let runtime = RuntimeBridge::new(source)?;

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(settings);
    let res = run_app(&mut terminal, app, runtime);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

fn setup_tracing(level: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log dir {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_env("DELLIV_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()
        .context("install tracing subscriber")?;

    Ok(())
}

/// CLI flags win over the config file; with neither, the demo set is used
fn source_from_args_and_config(args: &Args, config: &Config) -> SourceConfig {
    let latency = Duration::from_millis(config.fixture.latency_ms);
    if args.demo {
        return SourceConfig::Fixture {
            path: None,
            latency,
        };
    }
    if let Some(path) = args.fixture.clone() {
        return SourceConfig::Fixture {
            path: Some(path),
            latency,
        };
    }

    let http = |base_url: &str| SourceConfig::Http {
        base_url: normalize_base_url(base_url),
        token: config.api.token.clone(),
        timeout: Duration::from_secs(config.api.timeout_secs),
    };
    if let Some(api) = args.api.as_deref() {
        return http(api);
    }
    if let Some(api) = config.api.base_url.as_deref().filter(|s| !s.trim().is_empty()) {
        return http(api);
    }
    if let Some(path) = config.fixture.path.as_deref().and_then(config::expand_path) {
        return SourceConfig::Fixture {
            path: Some(path),
            latency,
        };
    }

    warn!("no orders source configured, using demo data");
    SourceConfig::Fixture {
        path: None,
        latency,
    }
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    app.mount();

    loop {
        pump_background(&mut app, &runtime);
        terminal.draw(|f| ui::draw(f, &mut app))?;
        if app.should_quit {
            let _ = runtime.send(RuntimeCommand::Shutdown);
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

/// Exchange work with the runtime thread: apply finished fetches, then
/// hand over the fetches the UI dispatched since the last pass
fn pump_background(app: &mut App, runtime: &RuntimeBridge) {
    for event in runtime.poll_events() {
        app.apply_runtime_event(event);
    }

    for request in app.take_fetch_requests() {
        let cmd = RuntimeCommand::FetchOrders {
            request_id: request.id,
            filter: request.filter,
        };
        if let Err(err) = runtime.send(cmd) {
            warn!(request_id = request.id, error = %err, "runtime unavailable");
            app.apply_runtime_event(RuntimeEvent::OrdersFailed {
                request_id: request.id,
                filter: request.filter,
                message: "serviço de pedidos indisponível".to_string(),
            });
        }
    }
}
