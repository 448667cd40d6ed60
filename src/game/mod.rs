pub mod board;
pub mod piece;
pub mod randomizer;
pub mod rules;
pub mod state;

pub use board::{Board, Cell};
pub use piece::{offsets, Piece, Tetromino};
pub use randomizer::{BagSource, PieceSource, ScriptedSource, UniformSource};
pub use state::{Command, Game, GameState, LockReport, Phase};
