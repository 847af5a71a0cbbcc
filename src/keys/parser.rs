use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::{CookError, Result};

/// Parses bindings written as `Ctrl+s`, `Shift+Tab`, `F5`.
pub fn parse_key(input: &str) -> Result<KeyEvent> {
    let parts: Vec<&str> = input.split('+').map(str::trim).collect();
    let (key_part, modifier_parts) = parts
        .split_last()
        .ok_or_else(|| CookError::Config(format!("No key code found in '{}'", input)))?;

    let mut modifiers = KeyModifiers::NONE;
    for part in modifier_parts {
        modifiers |= match part.to_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "shift" => KeyModifiers::SHIFT,
            "alt" => KeyModifiers::ALT,
            _ => {
                return Err(CookError::Config(format!(
                    "Unknown modifier '{}' in key '{}'",
                    part, input
                )))
            }
        };
    }

    if key_part.is_empty() {
        return Err(CookError::Config(format!("No key code found in '{}'", input)));
    }

    let code = parse_key_code(key_part)?;
    // Terminals report Shift+Tab as BackTab.
    if code == KeyCode::Tab && modifiers.contains(KeyModifiers::SHIFT) {
        return Ok(KeyEvent::new(
            KeyCode::BackTab,
            modifiers.difference(KeyModifiers::SHIFT),
        ));
    }
    Ok(KeyEvent::new(code, modifiers))
}

fn parse_key_code(s: &str) -> Result<KeyCode> {
    let lower = s.to_lowercase();
    let code = match lower.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "space" => KeyCode::Char(' '),
        f if f.starts_with('f') && f.len() > 1 => {
            let num: u8 = f[1..]
                .parse()
                .map_err(|_| CookError::Config(format!("Invalid function key: {}", s)))?;
            if !(1..=12).contains(&num) {
                return Err(CookError::Config(format!(
                    "Function key out of range: F{}",
                    num
                )));
            }
            KeyCode::F(num)
        }
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeyCode::Char(ch),
                _ => return Err(CookError::Config(format!("Unknown key: {}", s))),
            }
        }
    };
    Ok(code)
}
