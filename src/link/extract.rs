/// A closed `[!query]` token found right before the cursor.
///
/// Offsets are char indices into the buffer; `chars[substitution_start..substitution_end]`
/// is exactly `[!query]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub query: String,
    pub substitution_start: usize,
    pub substitution_end: usize,
}

/// Detects a `[!query]` token that ends exactly at `cursor`.
///
/// Returns `None` when:
/// - the buffer is empty
/// - the character before the cursor is not `]`
/// - no `[!` opener is found scanning backward (the scan stops at index 1,
///   the last position where `!` can still have a `[` before it)
pub fn extract(chars: &[char], cursor: usize) -> Option<Extraction> {
    if chars.is_empty() || cursor == 0 || cursor > chars.len() {
        return None;
    }
    if chars[cursor - 1] != ']' {
        return None;
    }

    let mut i = cursor.checked_sub(2)?;
    while i > 0 {
        if chars[i] == '!' && chars[i - 1] == '[' {
            return Some(Extraction {
                query: chars[i + 1..cursor - 1].iter().collect(),
                substitution_start: i - 1,
                substitution_end: cursor,
            });
        }
        i -= 1;
    }
    None
}
