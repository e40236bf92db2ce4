use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use folio::app::{App, AppEvent, PopupType, ViewMode};
use folio::config::Config;
use folio::github::{ClientOptions, GitHubClient};
use folio::settings::{FileStore, Settings};
use folio::ui::{self, TitleSync};
use ratatui::prelude::*;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Page {
    Home,
    Projects,
}

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "A terminal portfolio for a GitHub account", long_about = None)]
struct Args {
    /// GitHub account to show (overrides the config file)
    #[arg(short, long)]
    account: Option<String>,

    /// Path to the config file
    #[arg(short, long)]
    config: Option<String>,

    /// Where to write logs
    #[arg(long)]
    log_file: Option<String>,

    /// Page to open first
    #[arg(short, long, value_enum, default_value = "home")]
    page: Page,
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

/// Log to a file since the terminal belongs to the UI
fn init_logging(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("FOLIO_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = args
        .log_file
        .as_deref()
        .map(expand)
        .unwrap_or_else(|| Config::cache_dir().join("folio.log"));
    // Logging is best effort; the UI works without it
    if let Err(e) = init_logging(&log_path) {
        eprintln!("warning: logging disabled: {e:#}");
    }

    let mut config = match args.config.as_deref() {
        Some(path) => Config::load_from(&expand(path)),
        None => Config::load(),
    };
    if let Some(account) = args.account {
        config.account = account;
    }

    // Preferences are read before the first frame
    let settings = Settings::load(Box::new(FileStore::open(FileStore::default_path())));

    let token = config.token();
    if token.is_none() {
        info!("{} not set, using unauthenticated GitHub requests", config.token_env);
    }
    let client = GitHubClient::new(ClientOptions {
        api_base_url: config.api_base_url.clone(),
        token,
        request_timeout: config.request_timeout(),
        probe_timeout: config.probe_timeout(),
    })?;

    info!("starting folio for {}", config.account);
    let (mut app, events) = App::new(config, settings, client);
    if let Page::Projects = args.page {
        app.switch_view(ViewMode::Projects);
    }
    app.start();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, events).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("application error: {:#}", err);
        eprintln!("Error: {err:?}");
    }

    info!("folio shut down");
    Ok(())
}

async fn run_app<B: Backend + io::Write>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut events: UnboundedReceiver<AppEvent>,
) -> Result<()> {
    let mut title = TitleSync::default();
    loop {
        // Apply finished background work before drawing
        while let Ok(event) = events.try_recv() {
            app.handle_event(event);
        }
        app.on_tick(Instant::now());

        if let Err(e) = title.sync(terminal.backend_mut(), app.window_title()) {
            debug!("could not set window title: {}", e);
        }
        terminal.draw(|f| ui::draw(f, app))?;

        // Poll for events with timeout to allow async updates
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !handle_key(app, key.code, key.modifiers) {
                    return Ok(());
                }
            }
        }
    }
}

/// Returns false when the app should quit
fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> bool {
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }
    app.status_message = None;

    if app.popup.is_some() {
        handle_popup(app, code, modifiers);
        return true;
    }
    if app.preview.selected().is_some() {
        handle_preview(app, code);
        return true;
    }
    if app.documents.is_open() {
        handle_documents(app, code);
        return true;
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => return false,

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.previous(),
        KeyCode::Tab => app.toggle_view_mode(),
        KeyCode::Char('1') => app.switch_view(ViewMode::Home),
        KeyCode::Char('2') => app.switch_view(ViewMode::Projects),

        // Appearance
        KeyCode::Char('t') => app.toggle_dark_mode(),
        KeyCode::Char('L') => app.show_language_popup(),

        // Profile and links
        KeyCode::Char('g') => app.open_profile(),
        KeyCode::Char('s') => app.show_links_popup(),

        KeyCode::Char('?') => app.toggle_help(),

        _ => match app.view_mode {
            ViewMode::Home => handle_home_action(app, code),
            ViewMode::Projects => handle_projects_action(app, code),
        },
    }
    true
}

fn handle_popup(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let Some(popup_type) = app.popup.as_ref().map(|p| p.popup_type.clone()) else {
        return;
    };
    match popup_type {
        PopupType::Language => match code {
            KeyCode::Esc | KeyCode::Char('q') => app.close_popup(),
            KeyCode::Char('j') | KeyCode::Down => app.popup_next(),
            KeyCode::Char('k') | KeyCode::Up => app.popup_prev(),
            KeyCode::Enter => app.choose_language_in_popup(),
            _ => {}
        },
        PopupType::Links => match code {
            KeyCode::Esc | KeyCode::Char('q') => app.close_popup(),
            KeyCode::Char('j') | KeyCode::Down => app.popup_next(),
            KeyCode::Char('k') | KeyCode::Up => app.popup_prev(),
            KeyCode::Enter | KeyCode::Char('o') => app.open_selected_link(),
            _ => {}
        },
        PopupType::Help | PopupType::Readme(_) => match code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => app.close_popup(),
            KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),
            KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => app.scroll_down(),
            KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => app.scroll_up(),
            _ => {}
        },
    }
}

fn handle_preview(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_preview(),
        KeyCode::Char('o') | KeyCode::Enter => app.open_preview_externally(),
        _ => {}
    }
}

fn handle_documents(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_documents(),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => app.documents.next_tab(),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => app.documents.prev_tab(),
        KeyCode::Char('o') | KeyCode::Enter => app.open_current_document(),
        _ => {}
    }
}

fn handle_home_action(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Enter => app.home.toggle_selected(),
        KeyCode::Char('v') => app.open_documents(),
        _ => {}
    }
}

fn handle_projects_action(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Enter => app.open_preview(),
        KeyCode::Char('r') => app.show_readme(),
        _ => {}
    }
}
