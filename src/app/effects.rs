use crate::game::GameState;

const LOCK_FLASH_FRAMES: u8 = 2;
const CLEAR_BANNER_FRAMES: u8 = 20;

/// Short-lived visual cues derived from engine events. Counted in frames
/// of the host loop, not in game time.
#[derive(Debug, Default)]
pub struct Effects {
    pub lock_flash_cells: Vec<(usize, usize)>,
    pub lock_flash_frames: u8,
    pub clear_banner: Option<&'static str>,
    pub clear_banner_frames: u8,
    seen_locks: u64,
}

impl Effects {
    /// Picks up a lock that happened since the last call.
    pub fn observe(&mut self, state: &GameState) {
        if state.pieces_locked == self.seen_locks {
            return;
        }
        self.seen_locks = state.pieces_locked;
        let Some(report) = state.last_lock.as_ref() else {
            // restart
            self.lock_flash_frames = 0;
            self.clear_banner_frames = 0;
            self.clear_banner = None;
            return;
        };
        if report.rows_cleared == 0 {
            // cleared rows move the stack, so only flash a clean lock
            self.lock_flash_cells.clone_from(&report.cells);
            self.lock_flash_frames = LOCK_FLASH_FRAMES;
        } else {
            self.clear_banner = Some(clear_label(report.rows_cleared));
            self.clear_banner_frames = CLEAR_BANNER_FRAMES;
        }
    }

    /// Ages every effect by one frame.
    pub fn step(&mut self) {
        if self.lock_flash_frames > 0 {
            self.lock_flash_frames -= 1;
            if self.lock_flash_frames == 0 {
                self.lock_flash_cells.clear();
            }
        }
        if self.clear_banner_frames > 0 {
            self.clear_banner_frames -= 1;
            if self.clear_banner_frames == 0 {
                self.clear_banner = None;
            }
        }
    }

    pub fn is_flashing(&self, x: usize, y: usize) -> bool {
        self.lock_flash_frames > 0 && self.lock_flash_cells.contains(&(x, y))
    }
}

pub fn clear_label(rows: usize) -> &'static str {
    match rows {
        1 => "SINGLE",
        2 => "DOUBLE",
        3 => "TRIPLE",
        _ => "TETRIS!",
    }
}
