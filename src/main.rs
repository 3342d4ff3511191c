#![warn(clippy::all, clippy::pedantic)]

use std::fs::OpenOptions;
use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

use stackfall::app::App;
use stackfall::config::loader;
use stackfall::game::{INPUT_POLL_MS, RENDER_INTERVAL_MS};
use stackfall::terminal::{TerminalGuard, enter_terminal, install_panic_hook, restore_terminal};
use stackfall::ui;

const LOG_PATH: &str = "stackfall.log";

fn main() -> Result<()> {
    init_logging()?;
    info!("Starting stackfall");

    // Configuration problems are reported before the terminal is taken over
    let config_path = loader::get_config_file_path();
    let config = loader::load_config_from(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    let settings = config
        .validate()
        .with_context(|| format!("invalid configuration in {}", config_path.display()))?;
    info!("Configuration loaded from {}", config_path.display());

    // Terminal initialization; the guard restores it on every exit path
    install_panic_hook();
    let guard = TerminalGuard::new(restore_terminal);
    enter_terminal()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let app = App::new(settings);
    let res = run_app(&mut terminal, app);
    drop(guard);

    if let Err(err) = &res {
        error!("Game error: {err:?}");
    }
    info!("Exiting stackfall");
    res
}

// The terminal belongs to the UI, so log records go to a file
fn init_logging() -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(LOG_PATH)
        .with_context(|| format!("failed to create log file {LOG_PATH}"))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    let render_rate = Duration::from_millis(RENDER_INTERVAL_MS);
    let poll_timeout = Duration::from_millis(INPUT_POLL_MS);
    let mut last_render: Option<Instant> = None;

    // Explicitly flush any pending input events that might be in the buffer
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    loop {
        app.on_tick();

        let changed = app.sync_view() > 0;
        if changed || last_render.is_none_or(|at| at.elapsed() >= render_rate) {
            terminal.draw(|f| ui::render(f, &app))?;
            last_render = Some(Instant::now());
        }

        if app.should_quit {
            return Ok(());
        }

        if event::poll(poll_timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    debug!("Key event: {key:?}");
                    app.handle_key(&key);
                }
                Event::FocusGained => app.set_focus(true),
                Event::FocusLost => app.set_focus(false),
                Event::Resize(width, height) => {
                    debug!("Terminal resized to {width}x{height}");
                    last_render = None;
                }
                _ => {}
            }
        }
    }
}
