//! dex: a terminal catalog browser built with ratatui.
//!
//! This binary initialises the terminal, runs the main event loop,
//! and restores the terminal on exit or panic.
//!
//! Usage: `dex [QUERY]`, where QUERY is a list query such as
//! `page=2&items=50&search=pika`.

mod app;
mod background;
mod input;
mod render;
mod ui;

use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing_subscriber::EnvFilter;

use dex_core::{
    CatalogClient, Config, CoreError, CoreResult, FavoritesStore, HttpTransport, Keymap,
    ListQuery, LoadEvent, Theme,
};

use crate::app::{App, Request};
use crate::background::{spawn_catalog_loader, spawn_detail_fetch, spawn_items_fetch, FetchMessage};
use crate::input::{handle_key, InputState};
use crate::render::render;

const LOG_FILE: &str = "/tmp/dex.log";

type Client = Arc<CatalogClient<HttpTransport>>;

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Logs to a file so the terminal UI is left alone. `DEX_LOG` overrides the
/// default `info` filter.
fn init_logging() -> anyhow::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)
        .with_context(|| format!("failed to open log file {LOG_FILE}"))?;
    let filter = EnvFilter::try_from_env("DEX_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_env_filter(filter)
        .with_ansi(false)
        .init();
    Ok(())
}

/// `./config` when it exists, else `~/.config/dex`.
fn config_dir() -> PathBuf {
    let local = PathBuf::from("config");
    if local.exists() {
        return local;
    }
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
        .join(".config")
        .join("dex")
}

/// A missing file means defaults; a broken one is logged, then defaults.
fn load_or_default<T: Default>(path: &Path, loaded: CoreResult<T>) -> T {
    match loaded {
        Ok(value) => value,
        Err(CoreError::NotFound(_)) => T::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
            T::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cfg_dir = config_dir();
    let config_path = cfg_dir.join("default.toml");
    let config: Config = load_or_default(&config_path, Config::load(&config_path));
    let keymap_path = cfg_dir.join("keymap.toml");
    let keymap: Keymap = load_or_default(&keymap_path, Keymap::load(&keymap_path));
    let theme_path = cfg_dir.join("theme.toml");
    let theme: Theme = load_or_default(&theme_path, Theme::load(&theme_path));

    let query = match std::env::args().nth(1) {
        Some(arg) => {
            ListQuery::parse(&arg).with_context(|| format!("invalid list query '{arg}'"))?
        }
        None => ListQuery {
            items: config.ui.page_size,
            ..ListQuery::default()
        },
    };

    let favorites = FavoritesStore::open(config.storage.favorites_path(&cfg_dir));
    let client: Client = Arc::new(CatalogClient::from_config(&config.api));
    let app = App::new(config, keymap, theme, favorites, &query);
    tracing::info!(query = %query.to_query_string(), "starting dex");

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, app, client).await;

    restore_terminal(&mut terminal)?;

    match result {
        Ok(app) => {
            tracing::info!(query = %app.list_query().to_query_string(), "exiting");
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Starts the background work a dispatch asked for.
fn execute(
    request: Request,
    client: &Client,
    batch_size: usize,
    load_tx: &UnboundedSender<LoadEvent>,
    fetch_tx: &UnboundedSender<FetchMessage>,
) {
    match request {
        Request::LoadCatalog => spawn_catalog_loader(client.clone(), batch_size, load_tx.clone()),
        Request::FetchDetail(id) => spawn_detail_fetch(client.clone(), id, fetch_tx.clone()),
        Request::FetchItems(ids) => spawn_items_fetch(client.clone(), ids, fetch_tx.clone()),
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    client: Client,
) -> anyhow::Result<App> {
    let (load_tx, mut load_rx) = mpsc::unbounded_channel::<LoadEvent>();
    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel::<FetchMessage>();
    let batch_size = app.config().api.batch_size;
    let mut input_state = InputState::new();

    execute(Request::LoadCatalog, &client, batch_size, &load_tx, &fetch_tx);

    loop {
        // 1. Drain loader progress
        while let Ok(event) = load_rx.try_recv() {
            app = app.apply_load_event(event);
        }

        // 2. Drain one-off fetch results
        while let Ok(msg) = fetch_rx.try_recv() {
            app = match msg {
                FetchMessage::Detail { id, result } => app.apply_detail(id, result),
                FetchMessage::Items(result) => app.apply_fetched_items(result),
            };
        }

        // 3. Render
        terminal.draw(|f| render(f, &app))?;

        if app.should_quit() {
            break;
        }

        // 4. Poll for crossterm events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let (action, new_input_state) =
                    handle_key(key, app.mode(), &input_state, app.keymap());
                input_state = new_input_state;

                let (next, request) = app.dispatch(action);
                app = next;
                if let Some(request) = request {
                    execute(request, &client, batch_size, &load_tx, &fetch_tx);
                }
            }
        }
    }

    Ok(app)
}
