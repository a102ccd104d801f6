//! Stone Age Survivors - Camp Entry Point
//!
//! Initializes the terminal, opens the camp session and runs the camp
//! screen until the player quits.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use stone_age_survivors::data::{export_default_data, DataManager, DATA_DIR};
use stone_age_survivors::game::CampSession;
use stone_age_survivors::save::{FileStorage, ProgressionStore, Storage};
use stone_age_survivors::ui::App;

/// How long to wait for input before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    init_logging();
    log::info!("Starting Stone Age Survivors v{}", env!("CARGO_PKG_VERSION"));

    if std::env::args().any(|arg| arg == "--export-data") {
        let path = export_default_data(Path::new(DATA_DIR))?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let data = DataManager::new();
    let storage = FileStorage::default_location();
    log::info!("Progression directory: {:?}", storage.dir());
    let mut session = CampSession::open(ProgressionStore::new(storage), data.camp);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let result = run_camp_loop(&mut terminal, &mut app, &mut session);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Camp exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("Stone Age Survivors shut down cleanly");
    result
}

/// Log to a file so the TUI keeps stdout
fn init_logging() {
    let builder = || env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    match OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("stone-age-survivors.log")
    {
        Ok(file) => {
            builder().target(env_logger::Target::Pipe(Box::new(file))).init();
        }
        Err(_) => {
            // No log file: keep stderr quiet behind the TUI
            builder().filter_level(log::LevelFilter::Off).init();
        }
    }
}

fn run_camp_loop<S: Storage>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    session: &mut CampSession<S>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            app.render(frame, session);
        })?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events, not releases
                if key.kind == KeyEventKind::Press {
                    match app.handle_input(key, session) {
                        Ok(true) => break,
                        Ok(false) => {}
                        // A failed save is reported and the camp stays open
                        Err(e) => log::warn!("Input handling error: {}", e),
                    }
                }
            }
        }
    }

    Ok(())
}
