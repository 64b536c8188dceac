//! Entry point: the TUI by default, JSON subcommands for scripts.

mod app;
mod commands;
mod ui;

use std::io::{self, Stdout};
use std::time::Instant;

use clap::{Parser, Subcommand};
use crossterm::event::{self, Event as TermEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, ExecutableCommand};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use thiserror::Error;

use respire_core::{Config, Profile, SqliteStore, StoreError};

use app::App;
use ui::theme::Theme;

#[derive(Parser)]
#[command(name = "respire", version, about = "Breath-hold training in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the stored profile as JSON
    Status,
    /// Print the session plan as JSON
    Plan {
        /// Baseline seconds to plan for instead of the stored value
        #[arg(long)]
        baseline: Option<u32>,
    },
    /// Print recent completed sessions as JSON
    History {
        /// Maximum number of sessions to print
        #[arg(long, default_value = "10")]
        limit: usize,
    },
}

#[derive(Debug, Error)]
enum MainError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let config = Config::load_or_default();

    let result: Result<(), Box<dyn std::error::Error>> = match cli.command {
        Some(Commands::Status) => commands::status::run(&config),
        Some(Commands::Plan { baseline }) => commands::plan::run(&config, baseline),
        Some(Commands::History { limit }) => commands::history::run(&config, limit),
        None => run_tui(&config).map_err(Into::into),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run_tui(config: &Config) -> Result<(), MainError> {
    let store = commands::open_store(config)?;
    let profile = Profile::load(store);
    let mut app = App::new(profile);

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut app, config);
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, MainError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<(), MainError> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<SqliteStore>,
    config: &Config,
) -> Result<(), MainError> {
    let theme = Theme::default();
    let tick_rate = config.ui.tick_rate();
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw(frame, app, &theme, config.ui.unicode))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
