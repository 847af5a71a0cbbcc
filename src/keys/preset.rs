use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Form-level commands; plain typing never goes through this table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    Submit,
    CopyUrl,
    NextField,
    PrevField,
    Help,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Submit,
        Action::NextField,
        Action::PrevField,
        Action::CopyUrl,
        Action::Help,
        Action::Quit,
    ];

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "quit" => Some(Self::Quit),
            "submit" => Some(Self::Submit),
            "copy_url" => Some(Self::CopyUrl),
            "next_field" => Some(Self::NextField),
            "prev_field" => Some(Self::PrevField),
            "help" => Some(Self::Help),
            _ => None,
        }
    }

    pub fn hint_text(&self) -> &'static str {
        match self {
            Self::Quit => "beenden",
            Self::Submit => "speichern",
            Self::CopyUrl => "Link kopieren",
            Self::NextField => "nächstes Feld",
            Self::PrevField => "voriges Feld",
            Self::Help => "Hilfe",
        }
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::CONTROL)
}

pub fn default_bindings() -> HashMap<KeyEvent, Action> {
    let mut m = HashMap::new();
    m.insert(ctrl(KeyCode::Char('q')), Action::Quit);
    m.insert(ctrl(KeyCode::Char('c')), Action::Quit);
    m.insert(ctrl(KeyCode::Char('s')), Action::Submit);
    m.insert(ctrl(KeyCode::Char('y')), Action::CopyUrl);
    m.insert(key(KeyCode::Tab), Action::NextField);
    m.insert(key(KeyCode::BackTab), Action::PrevField);
    m.insert(key(KeyCode::F(1)), Action::Help);
    m
}
