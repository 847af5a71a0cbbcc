use std::sync::OnceLock;

use regex::Regex;

use super::form::ListStyle;

fn numbered_item() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\n(\d+)|^(\d+))\.").expect("valid list regex"))
}

/// Number of the last `N.` item that starts a line in `text`.
pub fn last_list_number(text: &str) -> Option<u64> {
    numbered_item()
        .captures_iter(text)
        .filter_map(|caps| caps.get(2).or_else(|| caps.get(3)))
        .filter_map(|m| m.as_str().parse().ok())
        .last()
}

/// Text inserted at the cursor when Enter is pressed in a list field.
pub fn continuation(style: ListStyle, text_before_cursor: &str) -> String {
    match style {
        ListStyle::Bullet => "\n- ".to_string(),
        ListStyle::Numbered => match last_list_number(text_before_cursor) {
            Some(n) => format!("\n{}. ", n + 1),
            None => "\n".to_string(),
        },
    }
}
