use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::{
    event::{KeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen},
};
use log::info;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use birdman::app::App;
use birdman::clock::MonotonicClock;
use birdman::config::{self, GameConfig};
use birdman::event::{Event, EventHandler};
use birdman::render::DisplayList;
use birdman::ui::{self, terminal::TerminalGuard};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

fn main() -> Result<()> {
    init_logging()?;

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = GameConfig::load(config_path.as_deref()).context("could not load config")?;
    let tick_rate = config.tick_rate_ms;

    // Setup terminal
    enable_raw_mode().context("could not enable raw mode")?;
    let mut guard = TerminalGuard::new(io::stdout());
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("could not enter the alternate screen")?;
    let release_events = matches!(supports_keyboard_enhancement(), Ok(true));
    if release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
        guard.keyboard_flags_pushed();
    }
    info!("Key release reporting: {}", release_events);

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let app = App::new(config, Box::new(MonotonicClock::new()), release_events);
    let result = run(&mut terminal, app, EventHandler::new(tick_rate));

    drop(guard);
    result
}

fn run(terminal: &mut Term, mut app: App, events: EventHandler) -> Result<()> {
    let mut list = DisplayList::new();
    loop {
        terminal.draw(|frame| ui::render(frame, &app, &mut list))?;

        match events.next()? {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.on_key(key),
        }

        if app.should_quit {
            info!("Quitting");
            return Ok(());
        }
    }
}

/// The terminal owns stdout and stderr, so logs go to a file.
fn init_logging() -> Result<()> {
    let Some(dirs) = config::project_dirs() else {
        return Ok(());
    };
    let dir = dirs.data_local_dir();
    fs::create_dir_all(dir).with_context(|| format!("could not create {}", dir.display()))?;
    let path = dir.join("birdman.log");
    let file = File::create(&path).with_context(|| format!("could not create {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
