//! Falling-block puzzle game for the terminal.
//!
//! [`game`] holds the rules engine and knows nothing about terminals;
//! [`app`] and [`ui`] drive it from crossterm input and draw it with ratatui.

pub mod app;
pub mod config;
pub mod game;
pub mod ui;

pub use config::{
    BOARD_H, BOARD_W, CELL_W, MIN_PANE_HEIGHT, MIN_PANE_WIDTH, PLAY_H, PLAY_W, SIDEBAR_W,
};
pub use game::{Command, Game, GameState, Phase};
