mod render;

use ratatui::prelude::*;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

pub use render::{kind_color, playfield_lines, preview_lines};

use crate::app::Effects;
use crate::{Game, MIN_PANE_HEIGHT, MIN_PANE_WIDTH, PLAY_H, PLAY_W, SIDEBAR_W};

pub fn draw_game(frame: &mut Frame, game: &Game, effects: &Effects, show_ghost: bool) {
    let area = frame.size();

    if area.width < MIN_PANE_WIDTH || area.height < MIN_PANE_HEIGHT {
        let msg = Paragraph::new(format!(
            "RESIZE TERMINAL (min {}x{})",
            MIN_PANE_WIDTH, MIN_PANE_HEIGHT
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("TERMTRIS"));
        frame.render_widget(msg, area);
        return;
    }

    // Outer "cabinet" frame.
    let cabinet = Block::default()
        .title("TERMTRIS")
        .border_type(BorderType::Thick)
        .borders(Borders::ALL)
        .title_alignment(Alignment::Left);
    let cabinet_inner = cabinet.inner(area);
    frame.render_widget(cabinet, area);

    // Play area left, sidebar right.
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(PLAY_W as u16), Constraint::Length(SIDEBAR_W)])
        .split(cabinet_inner);

    // Center the fixed-size well within the left column.
    let v_center = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(PLAY_H as u16),
            Constraint::Min(0),
        ])
        .split(cols[0]);
    let h_center = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(PLAY_W as u16),
            Constraint::Min(0),
        ])
        .split(v_center[1]);
    let play_rect = h_center[1];

    draw_playfield(frame, game, effects, show_ghost, play_rect);
    draw_sidebar(frame, game, effects, cols[1]);
}

fn draw_playfield(frame: &mut Frame, game: &Game, effects: &Effects, show_ghost: bool, play_rect: Rect) {
    let state = game.state();
    let paragraph = Paragraph::new(playfield_lines(state, effects, show_ghost));
    frame.render_widget(paragraph, play_rect);

    let overlay = if state.game_over() {
        Some(("GAME OVER", "r restart  q quit"))
    } else if state.paused {
        Some(("PAUSED", "p resume"))
    } else {
        None
    };
    if let Some((title, hint)) = overlay {
        let overlay_w = (PLAY_W as u16).saturating_sub(2).max(8);
        let overlay_h = 4u16;
        let popup = Rect {
            x: play_rect.x + (play_rect.width.saturating_sub(overlay_w)) / 2,
            y: play_rect.y + (play_rect.height.saturating_sub(overlay_h)) / 2,
            width: overlay_w.min(play_rect.width),
            height: overlay_h.min(play_rect.height),
        };
        let text = vec![
            Line::styled(title, Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Line::raw(hint),
        ];
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            popup,
        );
    }
}

fn draw_sidebar(frame: &mut Frame, game: &Game, effects: &Effects, area: Rect) {
    let state = game.state();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(9),
            Constraint::Min(0),
        ])
        .split(area);

    let next = Paragraph::new(preview_lines(state.next))
        .alignment(Alignment::Center)
        .block(Block::default().title("NEXT").borders(Borders::ALL));
    frame.render_widget(next, chunks[0]);

    let status = if state.game_over() {
        "OVER"
    } else if state.paused {
        "PAUSED"
    } else {
        "PLAYING"
    };
    let banner = effects.clear_banner.unwrap_or("");
    let info = Paragraph::new(vec![
        Line::raw(format!("{:<7} {}", "SCORE:", state.score)),
        Line::raw(format!("{:<7} {}", "BEST:", game.best_score())),
        Line::raw(format!("{:<7} {}", "LEVEL:", state.level)),
        Line::raw(format!("{:<7} {}", "LINES:", state.lines_cleared)),
        Line::raw(format!("{:<7} {}", "STATUS:", status)),
        Line::raw(""),
        Line::styled(banner, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    ])
    .block(Block::default().title("INFO").borders(Borders::ALL));
    frame.render_widget(info, chunks[1]);

    let controls = Paragraph::new(vec![
        Line::raw("←/→ a/d  move"),
        Line::raw("↑ w      rotate"),
        Line::raw("↓ s      soft drop"),
        Line::raw("space    hard drop"),
        Line::raw("p        pause"),
        Line::raw("r        restart"),
        Line::raw("q esc    quit"),
    ])
    .block(Block::default().title("CONTROLS").borders(Borders::ALL))
    .wrap(Wrap { trim: false });
    frame.render_widget(controls, chunks[2]);
}
