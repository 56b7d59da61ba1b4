//! Terminal UI for the tic-tac-toe engine.

mod app;
mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tictactoe_engine::{
    AiMoveProvider, AppConfig, FileLedger, GameSession, LlmClient, MemoryLedger, ScoreLedger,
    SoundCue,
};
use tracing::{error, info, instrument, warn};

use app::App;

/// How long to wait for a key before checking on the AI.
const TICK: Duration = Duration::from_millis(50);

/// Runs the TUI until the user quits.
pub async fn run_tui(config: AppConfig) -> Result<()> {
    // Log to a file so tracing output doesn't tear the screen.
    let log_file = std::fs::File::create("tictactoe.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(crate::DEFAULT_FILTER)),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!("Starting tic-tac-toe TUI");

    let ledger = open_ledger(&config);
    let provider = Arc::new(build_provider(&config));
    let session = GameSession::new(config.game_settings(), ledger, provider);
    let mut app = App::new(session, *config.theme(), *config.sound());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Input/render loop. AI turns run on the tokio runtime in the background.
#[instrument(skip_all)]
fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        for cue in app.tick() {
            ring(&cue);
        }

        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(command) = input::command_for(key.code, app.cursor()) {
                    app.handle_command(command);
                }
            }
        }

        if app.should_quit() {
            info!("User quit");
            return Ok(());
        }
    }
}

/// Terminals can't play tones, so every cue is a bell.
fn ring(cue: &SoundCue) {
    if cue.notes.is_empty() {
        return;
    }
    let mut stdout = io::stdout();
    if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
        warn!(error = %e, "Failed to ring bell");
    }
}

#[instrument(skip_all)]
fn open_ledger(config: &AppConfig) -> Box<dyn ScoreLedger> {
    match config.scores_path() {
        Some(path) => match FileLedger::open(path) {
            Ok(ledger) => Box::new(ledger),
            Err(e) => {
                warn!(error = %e, "Could not open scores file, keeping scores in memory");
                Box::new(MemoryLedger::new())
            }
        },
        None => Box::new(MemoryLedger::new()),
    }
}

#[instrument(skip_all)]
fn build_provider(config: &AppConfig) -> AiMoveProvider {
    match config.ai().create_llm_config() {
        Ok(llm) => AiMoveProvider::new(Arc::new(LlmClient::new(llm)), config.ai().timeout()),
        Err(e) => {
            info!(reason = %e.message, "No LLM configured, AI plays random moves");
            AiMoveProvider::offline()
        }
    }
}
