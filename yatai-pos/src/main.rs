//! Yatai POS entry point
//!
//! Initializes tracing (rolling log file + in-TUI log pane), loads the
//! persisted settings, then hands the terminal over to the event loop.

use std::io;

use anyhow::Context;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tracing_appender::rolling;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use yatai_pos::session::PosSession;
use yatai_pos::settings::{self, Settings};
use yatai_pos::ui::{self, App};

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f")
        )
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = settings::data_dir();
    let log_dir = data_dir.join("logs");
    std::fs::create_dir_all(&log_dir).context("failed to create logs directory")?;

    let file_appender = rolling::daily(&log_dir, "yatai-pos.log");
    let (non_blocking_file, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = if let Ok(from_env) = EnvFilter::try_from_default_env() {
        from_env
    } else if cfg!(debug_assertions) {
        EnvFilter::new("info,yatai_pos=debug,yatai_client=debug")
    } else {
        EnvFilter::new("info")
    };

    let file_layer = fmt::layer()
        .with_timer(LocalTimer)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_writer(non_blocking_file);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tui_logger::tracing_subscriber_layer())
        .with(file_layer)
        .init();

    // adapter for dependencies that log through the log crate
    tui_logger::init_logger(log::LevelFilter::Info).ok();
    tui_logger::set_default_level(log::LevelFilter::Info);

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        let msg = info.to_string();
        eprintln!("!!! APPLICATION PANIC !!!\nMessage: {msg}\nBacktrace:\n{backtrace}");
        tracing::error!(target: "panic", message = %msg, "panic occurred");
    }));

    let settings_path = settings::settings_file(&data_dir);
    let settings = Settings::load(&settings_path).unwrap_or_else(|err| {
        tracing::warn!(%err, "failed to load settings, using defaults");
        Settings::default()
    });

    tracing::info!(api_base_url = %settings.api_base_url, "Yatai POS starting...");

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let mut session = PosSession::new(settings, settings_path, events_tx);
    session.load_slots();
    let mut app = App::new(session, events_rx);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = ui::run(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.context("TUI loop failed")?;
    tracing::info!("Yatai POS stopped");
    Ok(())
}
