use std::time::Duration;

use tracing::{debug, info};

use crate::config::Settings;
use crate::game::randomizer::{source_for, PieceSource};
use crate::game::rules::{
    drop_interval, level_for, line_clear_points, HARD_DROP_POINTS_PER_ROW, LOCK_BONUS,
    SOFT_DROP_POINTS_PER_ROW,
};
use crate::game::{Board, Piece, Tetromino};
use crate::{BOARD_H, BOARD_W};

/// Player commands. Each maps to one engine call; `Quit` belongs to the host loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    Restart,
    Pause,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Falling,
    Locking,
    LineClear,
    GameOver,
}

/// What the most recent lock did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LockReport {
    pub cells: Vec<(usize, usize)>,
    pub rows_cleared: usize,
    pub points: u64,
}

/// Everything the presentation layer reads between mutations.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub board: Board,
    pub current: Piece,
    pub next: Tetromino,
    pub score: u64,
    pub level: u32,
    pub lines_cleared: u64,
    pub drop_interval: Duration,
    pub phase: Phase,
    pub paused: bool,
    pub pieces_locked: u64,
    pub last_lock: Option<LockReport>,
    gravity_elapsed: Duration,
}

impl GameState {
    pub fn new(source: &mut dyn PieceSource, start_level: u32) -> Self {
        let current = Piece::spawn(source.next_kind());
        let next = source.next_kind();
        Self {
            board: Board::new(BOARD_W, BOARD_H),
            current,
            next,
            score: 0,
            level: start_level,
            lines_cleared: 0,
            drop_interval: drop_interval(start_level),
            phase: Phase::Falling,
            paused: false,
            pieces_locked: 0,
            last_lock: None,
            gravity_elapsed: Duration::ZERO,
        }
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Where the current piece would land on a hard drop.
    pub fn ghost(&self) -> Piece {
        let mut ghost = self.current;
        while self.board.fits(&ghost.shifted(0, 1)) {
            ghost.y += 1;
        }
        ghost
    }
}

/// The engine: owns the state, the piece sequence and the rule settings.
pub struct Game {
    state: GameState,
    source: Box<dyn PieceSource>,
    start_level: u32,
    best_score: u64,
}

impl Game {
    pub fn new(mut source: Box<dyn PieceSource>, start_level: u32) -> Self {
        let state = GameState::new(source.as_mut(), start_level);
        debug!(kind = ?state.current.kind, next = ?state.next, start_level, "new game");
        Self {
            state,
            source,
            start_level,
            best_score: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            source_for(settings.randomizer, settings.seed),
            settings.start_level,
        )
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for setting up positions.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Highest score seen in this process, including the running game.
    pub fn best_score(&self) -> u64 {
        self.best_score.max(self.state.score)
    }

    /// Movement is accepted only while a piece is falling and the game runs.
    pub fn accepting_input(&self) -> bool {
        self.state.phase == Phase::Falling && !self.state.paused
    }

    /// Dispatches one command. Returns whether the state changed.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::SoftDrop => self.soft_drop(),
            Command::Rotate => self.rotate(),
            Command::HardDrop => self.hard_drop(),
            Command::Restart => self.restart(),
            Command::Pause => self.toggle_pause(),
            Command::Quit => false,
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.try_place(self.state.current.shifted(-1, 0))
    }

    pub fn move_right(&mut self) -> bool {
        self.try_place(self.state.current.shifted(1, 0))
    }

    /// One row down by hand. A blocked soft drop is a no-op; gravity locks.
    pub fn soft_drop(&mut self) -> bool {
        let moved = self.try_place(self.state.current.shifted(0, 1));
        if moved {
            self.state.score += SOFT_DROP_POINTS_PER_ROW;
        }
        moved
    }

    pub fn rotate(&mut self) -> bool {
        self.try_place(self.state.current.rotated())
    }

    pub fn hard_drop(&mut self) -> bool {
        if !self.accepting_input() {
            return false;
        }
        let landing = self.state.ghost();
        let rows = (landing.y - self.state.current.y) as u64;
        self.state.current = landing;
        self.state.score += rows * HARD_DROP_POINTS_PER_ROW;
        self.lock_current();
        true
    }

    /// One gravity step: fall a row, or lock when blocked.
    pub fn tick(&mut self) -> bool {
        if !self.accepting_input() {
            return false;
        }
        if !self.try_place(self.state.current.shifted(0, 1)) {
            self.lock_current();
        }
        true
    }

    /// Feeds wall-clock time to gravity, ticking once per elapsed drop
    /// interval. The interval is re-read after every tick, so a level-up
    /// mid-frame speeds up the remaining steps.
    pub fn advance(&mut self, elapsed: Duration) {
        if !self.accepting_input() {
            return;
        }
        self.state.gravity_elapsed += elapsed;
        while self.accepting_input() && self.state.gravity_elapsed >= self.state.drop_interval {
            self.state.gravity_elapsed -= self.state.drop_interval;
            self.tick();
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.state.phase != Phase::Falling {
            return false;
        }
        self.state.paused = !self.state.paused;
        debug!(paused = self.state.paused, "pause toggled");
        true
    }

    /// Starts over with a fresh state. Only honored once the game is over.
    pub fn restart(&mut self) -> bool {
        if !self.state.game_over() {
            return false;
        }
        self.best_score = self.best_score();
        self.state = GameState::new(self.source.as_mut(), self.start_level);
        info!(best = self.best_score, "restart");
        true
    }

    fn try_place(&mut self, next: Piece) -> bool {
        if !self.accepting_input() || !self.state.board.fits(&next) {
            return false;
        }
        self.state.current = next;
        true
    }

    fn lock_current(&mut self) {
        self.state.phase = Phase::Locking;
        let piece = self.state.current;
        let cells = self.state.board.lock(&piece);
        self.state.pieces_locked += 1;
        debug!(kind = ?piece.kind, x = piece.x, y = piece.y, rotation = piece.rotation, "lock");

        self.state.phase = Phase::LineClear;
        let rows = self.state.board.clear_full_rows();
        let points = if rows == 0 {
            LOCK_BONUS
        } else {
            line_clear_points(rows, self.state.level)
        };
        self.state.score += points;
        if rows > 0 {
            self.state.lines_cleared += rows as u64;
            info!(rows, points, total = self.state.lines_cleared, "lines cleared");
            self.update_level();
        }
        self.state.last_lock = Some(LockReport {
            cells,
            rows_cleared: rows,
            points,
        });
        self.state.gravity_elapsed = Duration::ZERO;
        self.spawn_next();
    }

    fn update_level(&mut self) {
        let level = level_for(self.state.lines_cleared, self.start_level);
        if level != self.state.level {
            self.state.level = level;
            self.state.drop_interval = drop_interval(level);
            info!(level, interval_ms = self.state.drop_interval.as_millis() as u64, "level up");
        }
    }

    /// Promotes the preview piece and draws a new one. A spawn that
    /// overlaps the stack ends the game.
    pub fn spawn_next(&mut self) {
        let piece = Piece::spawn(self.state.next);
        self.state.next = self.source.next_kind();
        self.state.current = piece;
        if self.state.board.fits(&piece) {
            self.state.phase = Phase::Falling;
            debug!(kind = ?piece.kind, next = ?self.state.next, "spawn");
        } else {
            self.state.phase = Phase::GameOver;
            self.state.paused = false;
            self.best_score = self.best_score();
            info!(
                score = self.state.score,
                lines = self.state.lines_cleared,
                level = self.state.level,
                "game over"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::randomizer::ScriptedSource;
    use crate::game::rules::MIN_DROP_INTERVAL;
    use crate::game::Cell;

    fn game_with(kinds: &[Tetromino]) -> Game {
        Game::new(Box::new(ScriptedSource::new(kinds.to_vec())), 0)
    }

    /// Fills row `y` except the columns in `holes`.
    fn fill_row_except(game: &mut Game, y: usize, holes: &[usize]) {
        let board = &mut game.state_mut().board;
        for x in 0..board.width {
            if !holes.contains(&x) {
                board.set(x, y, Cell::Filled(Tetromino::Z));
            }
        }
    }

    #[test]
    fn new_game_spawns_current_and_preview() {
        let game = game_with(&[Tetromino::T, Tetromino::S]);
        let state = game.state();
        assert_eq!(state.current, Piece::spawn(Tetromino::T));
        assert_eq!(state.next, Tetromino::S);
        assert_eq!(state.phase, Phase::Falling);
        assert_eq!((state.score, state.level, state.lines_cleared), (0, 0, 0));
    }

    #[test]
    fn moves_stop_at_walls() {
        let mut game = game_with(&[Tetromino::O]);
        let mut steps = 0;
        while game.move_left() {
            steps += 1;
        }
        assert_eq!(steps, 4);
        let before = game.state().clone();
        assert!(!game.move_left());
        assert_eq!(game.state(), &before);
    }

    #[test]
    fn rotation_blocked_by_stack_is_noop() {
        let mut game = game_with(&[Tetromino::I]);
        // I lies on row 1; the vertical turn needs column 5 rows 0..=3.
        game.state_mut().board.set(5, 3, Cell::Filled(Tetromino::O));
        let before = game.state().clone();
        assert!(!game.rotate());
        assert_eq!(game.state(), &before);
    }

    #[test]
    fn soft_drop_scores_per_row() {
        let mut game = game_with(&[Tetromino::T]);
        assert!(game.soft_drop());
        assert!(game.soft_drop());
        assert_eq!(game.state().score, 2);
        assert_eq!(game.state().current.y, 2);
    }

    #[test]
    fn blocked_soft_drop_does_not_lock() {
        let mut game = game_with(&[Tetromino::O]);
        while game.soft_drop() {}
        assert_eq!(game.state().pieces_locked, 0);
        assert_eq!(game.state().phase, Phase::Falling);
    }

    #[test]
    fn tick_falls_then_locks() {
        let mut game = game_with(&[Tetromino::O, Tetromino::T]);
        // O occupies rows y..y+1; it rests with anchor y = 18.
        for _ in 0..18 {
            assert!(game.tick());
        }
        assert_eq!(game.state().current.y, 18);
        assert_eq!(game.state().pieces_locked, 0);

        game.tick();
        let state = game.state();
        assert_eq!(state.pieces_locked, 1);
        assert_eq!(state.score, LOCK_BONUS);
        assert_eq!(state.current, Piece::spawn(Tetromino::T));
        assert_eq!(state.board.filled_count(), 4);
    }

    #[test]
    fn hard_drop_locks_immediately_with_bonus() {
        let mut game = game_with(&[Tetromino::I, Tetromino::O]);
        assert!(game.hard_drop());
        let state = game.state();
        assert_eq!(state.pieces_locked, 1);
        // I spawns with cells on row 1 and lands on row 19.
        assert_eq!(state.score, 18 * HARD_DROP_POINTS_PER_ROW + LOCK_BONUS);
        assert!((3..7).all(|x| state.board.get(x, 19) == Cell::Filled(Tetromino::I)));
        assert_eq!(state.current.kind, Tetromino::O);
    }

    #[test]
    fn single_line_scores_one_hundred() {
        let mut game = game_with(&[Tetromino::I, Tetromino::O]);
        fill_row_except(&mut game, 19, &[3, 4, 5, 6]);
        while game.tick() && game.state().pieces_locked == 0 {}

        let state = game.state();
        assert_eq!(state.score, 100);
        assert_eq!(state.lines_cleared, 1);
        assert_eq!(state.level, 0);
        assert_eq!(state.board.filled_count(), 0);
        let report = state.last_lock.as_ref().unwrap();
        assert_eq!(report.rows_cleared, 1);
        assert_eq!(report.points, 100);
    }

    #[test]
    fn tetris_scores_eight_hundred() {
        let mut game = game_with(&[Tetromino::I, Tetromino::O]);
        for y in 16..20 {
            fill_row_except(&mut game, y, &[0]);
        }
        assert!(game.rotate());
        while game.move_left() {}
        let drop_rows = (game.state().ghost().y - game.state().current.y) as u64;
        game.hard_drop();
        let state = game.state();
        assert_eq!(state.lines_cleared, 4);
        assert_eq!(state.score, 800 + drop_rows * HARD_DROP_POINTS_PER_ROW);
    }

    #[test]
    fn ten_lines_level_up_and_speed_up() {
        let mut game = game_with(&[Tetromino::I]);
        let start_interval = game.state().drop_interval;
        game.state_mut().lines_cleared = 9;
        fill_row_except(&mut game, 19, &[3, 4, 5, 6]);
        game.hard_drop();

        let state = game.state();
        assert_eq!(state.lines_cleared, 10);
        assert_eq!(state.level, 1);
        assert!(state.drop_interval < start_interval);
    }

    #[test]
    fn blocked_spawn_is_game_over() {
        let mut game = game_with(&[Tetromino::I, Tetromino::O]);
        // Stack reaching row 2 under the spawn columns; column 0 open so no clears.
        for y in 2..20 {
            for x in 3..7 {
                game.state_mut().board.set(x, y, Cell::Filled(Tetromino::J));
            }
        }
        game.tick();
        assert!(game.state().game_over());

        let before = game.state().clone();
        for cmd in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::SoftDrop,
            Command::Rotate,
            Command::HardDrop,
            Command::Pause,
        ] {
            assert!(!game.apply(cmd));
        }
        assert!(!game.tick());
        game.advance(Duration::from_secs(5));
        assert_eq!(game.state(), &before);
    }

    #[test]
    fn restart_only_after_game_over_and_keeps_best() {
        let mut game = game_with(&[Tetromino::I, Tetromino::O]);
        assert!(!game.restart());

        for y in 2..20 {
            for x in 3..7 {
                game.state_mut().board.set(x, y, Cell::Filled(Tetromino::J));
            }
        }
        game.state_mut().score = 1234;
        game.tick();
        assert!(game.state().game_over());

        assert!(game.apply(Command::Restart));
        let state = game.state();
        assert_eq!(state.phase, Phase::Falling);
        assert_eq!(state.score, 0);
        assert_eq!(state.board.filled_count(), 0);
        assert_eq!(game.best_score(), 1234 + LOCK_BONUS);
    }

    #[test]
    fn pause_freezes_everything() {
        let mut game = game_with(&[Tetromino::T]);
        assert!(game.apply(Command::Pause));
        let before = game.state().clone();
        assert!(!game.move_left());
        assert!(!game.hard_drop());
        game.advance(Duration::from_secs(10));
        assert_eq!(game.state(), &before);

        assert!(game.toggle_pause());
        assert!(game.move_left());
    }

    #[test]
    fn advance_ticks_per_interval() {
        let mut game = game_with(&[Tetromino::T]);
        let interval = game.state().drop_interval;
        game.advance(interval / 2);
        assert_eq!(game.state().current.y, 0);
        game.advance(interval / 2);
        assert_eq!(game.state().current.y, 1);
        game.advance(interval * 3);
        assert_eq!(game.state().current.y, 4);
    }

    #[test]
    fn high_start_level_uses_fast_gravity() {
        let game = Game::new(Box::new(ScriptedSource::new([Tetromino::T])), 12);
        assert_eq!(game.state().level, 12);
        assert_eq!(game.state().drop_interval, MIN_DROP_INTERVAL);
    }

    #[test]
    fn quit_is_left_to_the_host() {
        let mut game = game_with(&[Tetromino::T]);
        let before = game.state().clone();
        assert!(!game.apply(Command::Quit));
        assert_eq!(game.state(), &before);
    }
}
