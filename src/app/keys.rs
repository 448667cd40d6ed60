use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::Command;

/// Maps a key press to a game command. Releases and repeats from
/// terminals that report them are ignored.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        };
    }
    let command = match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Command::MoveLeft,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Command::MoveRight,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Command::SoftDrop,
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Command::Rotate,
        KeyCode::Char(' ') => Command::HardDrop,
        KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,
        KeyCode::Char('p') | KeyCode::Char('P') => Command::Pause,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };
    Some(command)
}
