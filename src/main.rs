mod app;
mod config;
mod error;
mod event;
mod games;
mod ui;

use std::fs::File;
use std::io::{self, Stdout};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use app::App;
use config::GameConfig;
use error::AppError;
use event::{Event, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn main() -> ExitCode {
    match start() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "exited with error");
            eprintln!("space-cleanup: {err}");
            ExitCode::FAILURE
        }
    }
}

fn start() -> Result<(), AppError> {
    let config = GameConfig::from_env()?;
    if let Some(path) = &config.log_file {
        init_tracing(path)?;
    }
    info!(tick_rate_ms = config.tick_rate_ms, "=== Space Cleanup startup ===");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let release_events = supports_keyboard_enhancement().unwrap_or(false);
    if release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let result = run(&mut terminal, config, release_events);

    // Restore terminal even when the loop failed
    if release_events {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(terminal: &mut Tui, config: GameConfig, release_events: bool) -> Result<(), AppError> {
    let events = EventHandler::new(Duration::from_millis(config.tick_rate_ms))?;
    let mut app = App::new(config, release_events);
    info!(release_events, "terminal ready");

    loop {
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        match events.next()? {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.on_key(key),
        }

        if app.should_quit {
            break;
        }
    }

    info!("shutting down");
    Ok(())
}

/// The terminal owns stdout, so logs go to a file.
fn init_tracing(path: &Path) -> Result<(), AppError> {
    let file = File::create(path).map_err(|source| AppError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
    Ok(())
}
