use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use tracing::Level;

// Shared game UI/constants.
pub const BOARD_W: usize = 10;
pub const BOARD_H: usize = 20;
pub const CELL_W: usize = 2; // render each block as two characters wide
pub const PLAY_W: usize = BOARD_W * CELL_W + 2; // inner width plus side walls
pub const PLAY_H: usize = BOARD_H + 2; // inner height plus ceiling/floor
pub const SIDEBAR_W: u16 = 24;
// Playfield, sidebar and cabinet border must all fit.
pub const MIN_PANE_WIDTH: u16 = (PLAY_W as u16) + SIDEBAR_W + 2;
pub const MIN_PANE_HEIGHT: u16 = (PLAY_H as u16) + 2;
pub const MAX_START_LEVEL: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Randomizer {
    /// Every kind is equally likely on every draw.
    Uniform,
    /// Shuffled bags of all seven kinds.
    Bag,
}

/// Command line for the game binary.
#[derive(Parser, Debug)]
#[command(name = "termtris", version, about = "Falling-block puzzle game for the terminal")]
pub struct Cli {
    /// Seed for piece sequencing. Omit for a random game.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Level to start at. Speed and line scores scale with level.
    #[arg(long, default_value_t = 0)]
    pub level: u32,

    /// Piece sequencing rule.
    #[arg(long, value_enum, default_value_t = Randomizer::Bag)]
    pub randomizer: Randomizer,

    /// Write diagnostics to this file (the terminal is owned by the game).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Minimum level for diagnostics written to --log-file.
    #[arg(long, default_value_t = Level::INFO)]
    pub log_level: Level,

    /// Hide the landing preview of the falling piece.
    #[arg(long)]
    pub no_ghost: bool,
}

/// Validated runtime settings.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub seed: Option<u64>,
    pub start_level: u32,
    pub randomizer: Randomizer,
    pub log_file: Option<PathBuf>,
    pub log_level: Level,
    pub show_ghost: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            start_level: 0,
            randomizer: Randomizer::Bag,
            log_file: None,
            log_level: Level::INFO,
            show_ghost: true,
        }
    }
}

impl Settings {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        if cli.level > MAX_START_LEVEL {
            bail!(
                "start level {} is out of range (0..={})",
                cli.level,
                MAX_START_LEVEL
            );
        }
        if let Some(path) = &cli.log_file {
            if path.is_dir() {
                bail!("log file {} is a directory", path.display());
            }
        }
        Ok(Self {
            seed: cli.seed,
            start_level: cli.level,
            randomizer: cli.randomizer,
            log_file: cli.log_file,
            log_level: cli.log_level,
            show_ghost: !cli.no_ghost,
        })
    }
}
