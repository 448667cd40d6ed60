use crate::game::{Piece, Tetromino};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Filled(Tetromino),
}

impl Cell {
    pub fn is_filled(self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// The playfield. Row 0 is the top; cells are stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Cell>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn in_bounds(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (xu, yu) = (x as usize, y as usize);
        (xu < self.width && yu < self.height).then_some((xu, yu))
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[self.idx(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: Cell) {
        let idx = self.idx(x, y);
        self.cells[idx] = value;
    }

    /// True only for in-bounds cells holding a locked block.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y)
            .is_some_and(|(xu, yu)| self.get(xu, yu).is_filled())
    }

    /// Whether `piece` can sit here: inside the walls and floor, and not
    /// overlapping locked cells. Cells above the ceiling are allowed.
    pub fn fits(&self, piece: &Piece) -> bool {
        piece.cells().iter().all(|&(x, y)| {
            x >= 0
                && (x as usize) < self.width
                && (y < 0 || (y as usize) < self.height)
                && !self.is_occupied(x, y)
        })
    }

    /// Writes the piece into the grid and returns the cells written.
    /// Cells above the ceiling are dropped; filled cells are never overwritten.
    pub fn lock(&mut self, piece: &Piece) -> Vec<(usize, usize)> {
        let mut written = Vec::with_capacity(4);
        for (x, y) in piece.cells() {
            if let Some((xu, yu)) = self.in_bounds(x, y) {
                debug_assert!(!self.get(xu, yu).is_filled(), "lock over filled cell");
                if !self.get(xu, yu).is_filled() {
                    self.set(xu, yu, Cell::Filled(piece.kind));
                    written.push((xu, yu));
                }
            }
        }
        written
    }

    pub fn row_is_full(&self, y: usize) -> bool {
        (0..self.width).all(|x| self.get(x, y).is_filled())
    }

    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.height).filter(|&y| self.row_is_full(y)).collect()
    }

    /// Removes every full row, drops the rows above, and refills the top
    /// with empty rows. Returns how many rows went.
    pub fn clear_full_rows(&mut self) -> usize {
        let full = self.full_rows();
        if full.is_empty() {
            return 0;
        }
        let mut kept = Vec::with_capacity(self.cells.len());
        kept.resize(full.len() * self.width, Cell::Empty);
        for y in (0..self.height).filter(|y| !full.contains(y)) {
            let start = self.idx(0, y);
            kept.extend_from_slice(&self.cells[start..start + self.width]);
        }
        self.cells = kept;
        full.len()
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_filled()).count()
    }
}
