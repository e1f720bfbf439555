#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use neonfall::config::{self, Config};
use neonfall::ui::{self, TerminalCanvas};
use neonfall::Simulator;
use ratatui::{Terminal, prelude::*};

fn main() -> Result<()> {
    let (config, config_error) = match config::loader::load_config_from_file() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    // Create log file and redirect stderr to it
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&config.host.log_file)
        .with_context(|| format!("failed to create log file {}", config.host.log_file))?;

    // Safety: We're redirecting stderr to our log file using standard POSIX operations
    unsafe {
        libc::dup2(log_file.as_raw_fd(), io::stderr().as_raw_fd());
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting neonfall");
    match config_error {
        None => info!("Configuration loaded successfully"),
        Some(e) => error!("Failed to load configuration: {e}. Continuing with defaults"),
    }

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut simulator = Simulator::new(&config);
    let res = run_app(&mut terminal, &mut simulator, config.host.frame_interval());

    // Teardown always runs, even if the loop failed
    simulator.stop();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Backdrop error: {err:?}");
        return Err(err);
    }

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    simulator: &mut Simulator,
    frame_interval: Duration,
) -> Result<()> {
    let size = terminal.size()?;
    let (width, height) = ui::surface_size(size.width, size.height);
    simulator.start(width, height);

    let mut last_frame = Instant::now()
        .checked_sub(frame_interval)
        .unwrap_or_else(Instant::now);

    loop {
        if last_frame.elapsed() >= frame_interval {
            terminal.draw(|f| {
                let area = f.area();
                let mut canvas = TerminalCanvas::new(f.buffer_mut(), area);
                simulator.frame(&mut canvas);
            })?;
            last_frame = Instant::now();
        }

        let timeout = frame_interval.saturating_sub(last_frame.elapsed());
        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                debug!("Key event: {key:?}");
                let ctrl_c =
                    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
                if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    info!("Quit requested");
                    return Ok(());
                }
            }
            Event::Resize(columns, rows) => {
                let (width, height) = ui::surface_size(columns, rows);
                simulator.on_resize(width, height);
            }
            _ => {}
        }
    }
}
