use ratatui::prelude::*;
use ratatui::text::{Line, Span};

use crate::app::Effects;
use crate::game::{GameState, Piece, Tetromino};
use crate::{BOARD_W, CELL_W};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Glyph {
    Empty,
    Block(Tetromino),
    Ghost,
    Flash,
}

pub fn kind_color(kind: Tetromino) -> Color {
    match kind {
        Tetromino::I => Color::Cyan,
        Tetromino::O => Color::Yellow,
        Tetromino::T => Color::Magenta,
        Tetromino::S => Color::Green,
        Tetromino::Z => Color::Red,
        Tetromino::J => Color::Blue,
        Tetromino::L => Color::LightYellow,
    }
}

fn block_span(kind: Tetromino) -> Span<'static> {
    Span::styled(
        "█".repeat(CELL_W),
        Style::default().fg(kind_color(kind)).add_modifier(Modifier::BOLD),
    )
}

fn glyph_span(glyph: Glyph) -> Span<'static> {
    match glyph {
        Glyph::Empty => Span::raw(" ".repeat(CELL_W)),
        Glyph::Block(kind) => block_span(kind),
        Glyph::Ghost => Span::styled("·".repeat(CELL_W), Style::default().fg(Color::DarkGray)),
        Glyph::Flash => Span::styled(
            "▓".repeat(CELL_W),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    }
}

/// Lines of the walled well: locked stack, flash, ghost and falling piece.
pub fn playfield_lines(state: &GameState, effects: &Effects, show_ghost: bool) -> Vec<Line<'static>> {
    let board = &state.board;
    let mut glyphs = vec![vec![Glyph::Empty; board.width]; board.height];

    for (y, row) in glyphs.iter_mut().enumerate() {
        for (x, glyph) in row.iter_mut().enumerate() {
            if let crate::game::Cell::Filled(kind) = board.get(x, y) {
                *glyph = if effects.is_flashing(x, y) {
                    Glyph::Flash
                } else {
                    Glyph::Block(kind)
                };
            }
        }
    }

    let mut plot = |piece: &Piece, glyph: Glyph, only_empty: bool| {
        for (x, y) in piece.cells() {
            if x < 0 || y < 0 {
                continue;
            }
            let (xu, yu) = (x as usize, y as usize);
            if xu < board.width && yu < board.height {
                let cell = &mut glyphs[yu][xu];
                if !only_empty || *cell == Glyph::Empty {
                    *cell = glyph;
                }
            }
        }
    };
    if show_ghost && !state.game_over() {
        plot(&state.ghost(), Glyph::Ghost, true);
    }
    plot(&state.current, Glyph::Block(state.current.kind), false);

    let wall = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let inner = BOARD_W * CELL_W;
    let mut lines = Vec::with_capacity(board.height + 2);
    lines.push(Line::styled(format!("┌{}┐", "─".repeat(inner)), wall));
    for row in glyphs {
        let mut spans = Vec::with_capacity(row.len() + 2);
        spans.push(Span::styled("│", wall));
        spans.extend(row.into_iter().map(glyph_span));
        spans.push(Span::styled("│", wall));
        lines.push(Line::from(spans));
    }
    lines.push(Line::styled(format!("└{}┘", "═".repeat(inner)), wall));
    lines
}

/// The next piece, centered in a 4x2 box.
pub fn preview_lines(kind: Tetromino) -> Vec<Line<'static>> {
    const BOX_W: i32 = 4;
    const BOX_H: i32 = 2;
    let (cells, (w, h)) = Piece::preview_cells(kind);
    let left = (BOX_W - w) / 2;
    let top = (BOX_H - h) / 2;

    (0..BOX_H)
        .map(|row| {
            let spans: Vec<Span<'static>> = (0..BOX_W)
                .map(|col| {
                    if cells.contains(&(col - left, row - top)) {
                        block_span(kind)
                    } else {
                        glyph_span(Glyph::Empty)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}
