mod effects;
mod keys;

use std::fs::File;
use std::io::{stdout, Stdout};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};
use tracing_subscriber::util::SubscriberInitExt;

pub use effects::{clear_label, Effects};
pub use keys::command_for;

use crate::config::Settings;
use crate::ui::draw_game;
use crate::{Command, Game};

type Term = Terminal<CrosstermBackend<Stdout>>;

const FRAME_POLL: Duration = Duration::from_millis(50);

/// Sends diagnostics to the configured log file. Without one, tracing
/// stays uninstalled so nothing writes over the game screen.
pub fn init_logging(settings: &Settings) -> Result<()> {
    let Some(path) = settings.log_file.as_ref() else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(settings.log_level)
        .compact()
        .finish()
        .try_init()
        .context("cannot install log subscriber")?;
    Ok(())
}

pub fn run(settings: &Settings) -> Result<()> {
    let mut tui = TuiGuard::new().context("cannot set up terminal")?;
    info!(
        seed = ?settings.seed,
        randomizer = ?settings.randomizer,
        start_level = settings.start_level,
        "session start"
    );
    let result = run_loop(tui.terminal_mut(), settings);
    if let Err(err) = &result {
        warn!(error = %err, "session ended with error");
    }
    result
}

fn run_loop(terminal: &mut Term, settings: &Settings) -> Result<()> {
    let mut game = Game::from_settings(settings);
    let mut effects = Effects::default();
    let mut last_frame = Instant::now();

    loop {
        let now = Instant::now();
        game.advance(now - last_frame);
        last_frame = now;

        effects.observe(game.state());
        terminal.draw(|frame| draw_game(frame, &game, &effects, settings.show_ghost))?;
        effects.step();

        if event::poll(FRAME_POLL)? {
            if let Event::Key(key) = event::read()? {
                match command_for(key) {
                    Some(Command::Quit) => break,
                    Some(command) => {
                        game.apply(command);
                    }
                    None => {}
                }
            }
        }
    }
    info!(
        score = game.state().score,
        best = game.best_score(),
        "session end"
    );
    Ok(())
}

/// Raw mode plus alternate screen for as long as the guard lives.
struct TuiGuard {
    terminal: Term,
}

impl TuiGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Term {
        &mut self.terminal
    }
}

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
