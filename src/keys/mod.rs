pub mod parser;
pub mod preset;

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::{CookError, Result};
use preset::{default_bindings, Action};

pub struct KeybindingMap {
    bindings: HashMap<KeyEvent, Action>,
}

impl KeybindingMap {
    pub fn from_config(overrides: &HashMap<String, String>) -> Result<Self> {
        let mut bindings = default_bindings();

        for (action_name, key_str) in overrides {
            let action = Action::from_name(action_name)
                .ok_or_else(|| CookError::Config(format!("Unknown action: {}", action_name)))?;
            let key_event = parser::parse_key(key_str)?;

            bindings.retain(|_, v| v != &action);
            bindings.insert(key_event, action);
        }

        Ok(Self { bindings })
    }

    /// Looks up a terminal key event, ignoring press/repeat kind and the
    /// Shift flag some terminals attach to BackTab.
    pub fn resolve(&self, key: &KeyEvent) -> Option<&Action> {
        let mut modifiers = key.modifiers;
        if key.code == KeyCode::BackTab {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        self.bindings.get(&KeyEvent::new(key.code, modifiers))
    }

    pub fn hints(&self) -> Vec<(String, &'static str)> {
        let mut hints = Vec::new();
        for action in &Action::ALL {
            // Lowest label wins when an action has several keys
            let key = self
                .bindings
                .iter()
                .filter(|(_, a)| *a == action)
                .map(|(k, _)| format_key_event(k))
                .min();
            if let Some(key) = key {
                hints.push((key, action.hint_text()));
            }
        }
        hints
    }
}

fn format_key_event(key: &KeyEvent) -> String {
    let mut parts: Vec<String> = [
        (KeyModifiers::CONTROL, "Ctrl"),
        (KeyModifiers::ALT, "Alt"),
        (KeyModifiers::SHIFT, "Shift"),
    ]
    .iter()
    .filter(|(m, _)| key.modifiers.contains(*m))
    .map(|(_, name)| name.to_string())
    .collect();

    parts.push(match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        // Enter, Esc, Tab, Home, PageUp, ... print as their names
        other => format!("{:?}", other),
    });

    parts.join("+")
}
