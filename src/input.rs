//! Key translation.  Every key maps to exactly one `Action`; keys the game
//! does not care about become `Action::None` instead of an error.

use crossterm::event::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Enter,
    None,
}

impl Action {
    /// Browser-style key codes.
    pub fn from_key_code(code: u32) -> Action {
        match code {
            13 => Action::Enter,
            37 => Action::Left,
            38 => Action::Up,
            39 => Action::Right,
            40 => Action::Down,
            _ => Action::None,
        }
    }

    /// Terminal keys: arrows and Enter, with W/A/S/D as movement aliases.
    pub fn from_key(code: &KeyCode) -> Action {
        match code {
            KeyCode::Enter => Action::Enter,
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Action::Left,
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Action::Right,
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Action::Up,
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Action::Down,
            _ => Action::None,
        }
    }
}
