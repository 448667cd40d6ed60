use crate::BOARD_W;

/// The seven tetromino kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tetromino {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl Tetromino {
    pub const ALL: [Tetromino; 7] = [
        Tetromino::I,
        Tetromino::O,
        Tetromino::T,
        Tetromino::S,
        Tetromino::Z,
        Tetromino::J,
        Tetromino::L,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn letter(self) -> char {
        match self {
            Tetromino::I => 'I',
            Tetromino::O => 'O',
            Tetromino::T => 'T',
            Tetromino::S => 'S',
            Tetromino::Z => 'Z',
            Tetromino::J => 'J',
            Tetromino::L => 'L',
        }
    }
}

pub type Offset = (i32, i32);

// Rotation 0 of each kind inside its 4x4 box, in `Tetromino::ALL` order.
const SPAWN_OFFSETS: [[Offset; 4]; 7] = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(1, 0), (2, 0), (1, 1), (2, 1)],
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(2, 0), (0, 1), (1, 1), (2, 1)],
];

// Side of the square each kind turns inside; 0 means the kind never turns.
const TURN_BOX: [i32; 7] = [4, 0, 3, 3, 3, 3, 3];

const ROTATIONS: [[[Offset; 4]; 4]; 7] = build_rotations();

const fn build_rotations() -> [[[Offset; 4]; 4]; 7] {
    let mut table = [[[(0, 0); 4]; 4]; 7];
    let mut kind = 0;
    while kind < 7 {
        table[kind][0] = SPAWN_OFFSETS[kind];
        let n = TURN_BOX[kind];
        let mut rot = 1;
        while rot < 4 {
            let mut cell = 0;
            while cell < 4 {
                let (x, y) = table[kind][rot - 1][cell];
                // clockwise quarter turn within the n x n box
                table[kind][rot][cell] = if n == 0 { (x, y) } else { (n - 1 - y, x) };
                cell += 1;
            }
            rot += 1;
        }
        kind += 1;
    }
    table
}

/// Occupied cells of `kind` at `rotation`, relative to the piece anchor.
/// The rotation index wraps modulo 4.
pub fn offsets(kind: Tetromino, rotation: u8) -> &'static [Offset; 4] {
    &ROTATIONS[kind.index()][(rotation % 4) as usize]
}

/// A tetromino placed on the grid. `x`/`y` anchor the top-left of its 4x4 box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub kind: Tetromino,
    pub rotation: u8,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    pub fn new(kind: Tetromino, x: i32, y: i32) -> Self {
        Self {
            kind,
            rotation: 0,
            x,
            y,
        }
    }

    /// Piece centered at the top of the board.
    pub fn spawn(kind: Tetromino) -> Self {
        Self::new(kind, (BOARD_W as i32 - 4) / 2, 0)
    }

    /// Absolute grid cells covered by this piece.
    pub fn cells(&self) -> [(i32, i32); 4] {
        let rel = *offsets(self.kind, self.rotation);
        rel.map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn rotated(&self) -> Self {
        Self {
            rotation: (self.rotation + 1) % 4,
            ..*self
        }
    }

    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Rotation-0 cells pushed against the top-left corner, plus the
    /// bounding size `(w, h)`. Used by the next-piece preview.
    pub fn preview_cells(kind: Tetromino) -> ([Offset; 4], (i32, i32)) {
        let cells = *offsets(kind, 0);
        let min_x = cells.iter().map(|c| c.0).min().unwrap_or(0);
        let min_y = cells.iter().map(|c| c.1).min().unwrap_or(0);
        let max_x = cells.iter().map(|c| c.0).max().unwrap_or(0);
        let max_y = cells.iter().map(|c| c.1).max().unwrap_or(0);
        let normalized = cells.map(|(x, y)| (x - min_x, y - min_y));
        (normalized, (max_x - min_x + 1, max_y - min_y + 1))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn as_set(cells: &[Offset]) -> BTreeSet<Offset> {
        cells.iter().copied().collect()
    }

    #[test]
    fn every_rotation_has_four_distinct_cells_in_box() {
        for kind in Tetromino::ALL {
            for rot in 0..4 {
                let cells = offsets(kind, rot);
                assert_eq!(as_set(cells).len(), 4, "{kind:?} rotation {rot}");
                for &(x, y) in cells {
                    assert!((0..4).contains(&x) && (0..4).contains(&y));
                }
            }
        }
    }

    #[test]
    fn t_turns_clockwise() {
        let up = as_set(offsets(Tetromino::T, 0));
        let right = as_set(offsets(Tetromino::T, 1));
        assert_eq!(up, as_set(&[(1, 0), (0, 1), (1, 1), (2, 1)]));
        assert_eq!(right, as_set(&[(1, 0), (1, 1), (2, 1), (1, 2)]));
    }

    #[test]
    fn o_never_changes() {
        let base = as_set(offsets(Tetromino::O, 0));
        for rot in 1..4 {
            assert_eq!(as_set(offsets(Tetromino::O, rot)), base);
        }
    }

    #[test]
    fn rotation_index_wraps() {
        for kind in Tetromino::ALL {
            assert_eq!(offsets(kind, 5), offsets(kind, 1));
        }
    }

    #[test]
    fn four_turns_return_to_start() {
        for kind in Tetromino::ALL {
            let start = Piece::spawn(kind);
            let turned = start.rotated().rotated().rotated().rotated();
            assert_eq!(as_set(&turned.cells()), as_set(&start.cells()));
            assert_eq!(turned, start);
        }
    }

    #[test]
    fn spawn_is_centered_at_top() {
        let piece = Piece::spawn(Tetromino::I);
        assert_eq!((piece.x, piece.y), (3, 0));
        assert_eq!(piece.cells(), [(3, 1), (4, 1), (5, 1), (6, 1)]);
    }

    #[test]
    fn preview_cells_are_normalized() {
        let (cells, size) = Piece::preview_cells(Tetromino::I);
        assert_eq!(cells, [(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert_eq!(size, (4, 1));

        let (cells, size) = Piece::preview_cells(Tetromino::O);
        assert_eq!(as_set(&cells), as_set(&[(0, 0), (1, 0), (0, 1), (1, 1)]));
        assert_eq!(size, (2, 2));
    }
}
