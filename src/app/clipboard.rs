use std::io::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use crossterm::style::Print;
use crossterm::QueueableCommand;

use crate::error::{CookError, Result};

/// OSC 52 "set clipboard" escape for `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Hands `text` to the terminal's clipboard through `out`.
pub fn copy_to_clipboard<W: Write>(out: &mut W, text: &str) -> Result<()> {
    out.queue(Print(osc52_sequence(text)))
        .and_then(|out| out.flush())
        .map_err(|e| CookError::Clipboard(e.to_string()))
}
