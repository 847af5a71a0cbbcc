use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::AppState;

pub const TEST_ORIGIN: &str = "http://127.0.0.1:8080";

pub fn test_state() -> AppState {
    AppState::new(TEST_ORIGIN, 3000, vec![])
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn char_key(ch: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)
}

pub fn ctrl_key(ch: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
}
