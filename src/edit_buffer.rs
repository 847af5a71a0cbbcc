use crate::link::Substitution;

/// Text of one form field plus its caret, indexed by `char`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditBuffer {
    pub chars: Vec<char>,
    pub cursor: usize,
}

impl EditBuffer {
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let cursor = chars.len();
        Self { chars, cursor }
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Replaces the whole content and parks the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        *self = Self::new(text);
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, ch: char) {
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        let inserted: Vec<char> = s.chars().collect();
        let n = inserted.len();
        self.chars.splice(self.cursor..self.cursor, inserted);
        self.cursor += n;
    }

    pub fn text_before_cursor(&self) -> String {
        self.chars[..self.cursor].iter().collect()
    }

    /// Splices a resolved recipe link in. Returns false when the buffer has
    /// shrunk below the recorded offsets in the meantime.
    pub fn apply_substitution<F>(&mut self, sub: &Substitution<F>) -> bool {
        match sub.apply(&mut self.chars) {
            Some(cursor) => {
                self.cursor = cursor;
                true
            }
            None => false,
        }
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.chars.len() {
            self.chars.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.chars.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = self.line_start(self.cursor);
    }

    pub fn move_end(&mut self) {
        self.cursor = self.line_end(self.cursor);
    }

    pub fn move_word_left(&mut self) {
        while self.cursor > 0 && self.chars[self.cursor - 1].is_whitespace() {
            self.cursor -= 1;
        }
        while self.cursor > 0 && !self.chars[self.cursor - 1].is_whitespace() {
            self.cursor -= 1;
        }
    }

    pub fn move_word_right(&mut self) {
        let len = self.chars.len();
        while self.cursor < len && !self.chars[self.cursor].is_whitespace() {
            self.cursor += 1;
        }
        while self.cursor < len && self.chars[self.cursor].is_whitespace() {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        let start = self.line_start(self.cursor);
        if start == 0 {
            self.cursor = 0;
            return;
        }
        let col = self.cursor - start;
        let prev_start = self.line_start(start - 1);
        let prev_len = (start - 1) - prev_start;
        self.cursor = prev_start + col.min(prev_len);
    }

    pub fn move_down(&mut self) {
        let end = self.line_end(self.cursor);
        if end >= self.chars.len() {
            self.cursor = self.chars.len();
            return;
        }
        let col = self.cursor - self.line_start(self.cursor);
        let next_start = end + 1;
        let next_len = self.line_end(next_start) - next_start;
        self.cursor = next_start + col.min(next_len);
    }

    /// Cursor position as (line, column), both zero-based.
    pub fn line_col(&self) -> (usize, usize) {
        let line = self.chars[..self.cursor]
            .iter()
            .filter(|&&c| c == '\n')
            .count();
        (line, self.cursor - self.line_start(self.cursor))
    }

    fn line_start(&self, pos: usize) -> usize {
        self.chars[..pos]
            .iter()
            .rposition(|&c| c == '\n')
            .map(|p| p + 1)
            .unwrap_or(0)
    }

    fn line_end(&self, pos: usize) -> usize {
        self.chars[pos..]
            .iter()
            .position(|&c| c == '\n')
            .map(|p| pos + p)
            .unwrap_or(self.chars.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cursor_at_end() {
        let buf = EditBuffer::new("Naan");
        assert_eq!(buf.text(), "Naan");
        assert_eq!(buf.cursor, 4);
    }

    #[test]
    fn default_is_empty() {
        let buf = EditBuffer::default();
        assert!(buf.is_empty());
        assert_eq!(buf.cursor, 0);
    }

    #[test]
    fn insert_char_mid_text() {
        let mut buf = EditBuffer::new("Nan");
        buf.cursor = 1;
        buf.insert_char('a');
        assert_eq!(buf.text(), "Naan");
        assert_eq!(buf.cursor, 2);
    }

    #[test]
    fn insert_str_moves_cursor_past_insert() {
        let mut buf = EditBuffer::new("- Mehl\n");
        buf.insert_str("- ");
        assert_eq!(buf.text(), "- Mehl\n- ");
        assert_eq!(buf.cursor, 9);
    }

    #[test]
    fn insert_str_keeps_text_after_cursor() {
        let mut buf = EditBuffer::new("12");
        buf.cursor = 1;
        buf.insert_str("ab");
        assert_eq!(buf.text(), "1ab2");
        assert_eq!(buf.cursor, 3);
    }

    #[test]
    fn set_text_and_clear() {
        let mut buf = EditBuffer::new("alt");
        buf.set_text("neu");
        assert_eq!(buf.text(), "neu");
        assert_eq!(buf.cursor, 3);
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.cursor, 0);
    }

    #[test]
    fn delete_back_and_forward() {
        let mut buf = EditBuffer::new("Salz");
        buf.delete_back();
        assert_eq!(buf.text(), "Sal");
        buf.cursor = 0;
        buf.delete_forward();
        assert_eq!(buf.text(), "al");
        buf.delete_back();
        assert_eq!(buf.text(), "al");
        assert_eq!(buf.cursor, 0);
    }

    #[test]
    fn move_left_right_clamp() {
        let mut buf = EditBuffer::new("a");
        buf.move_right();
        assert_eq!(buf.cursor, 1);
        buf.move_left();
        buf.move_left();
        assert_eq!(buf.cursor, 0);
    }

    #[test]
    fn home_end_stay_on_current_line() {
        let mut buf = EditBuffer::new("- Mehl\n- Salz");
        buf.cursor = 10;
        buf.move_home();
        assert_eq!(buf.cursor, 7);
        buf.move_end();
        assert_eq!(buf.cursor, 13);
    }

    #[test]
    fn word_jumps() {
        let mut buf = EditBuffer::new("560 g Mehl");
        buf.cursor = 0;
        buf.move_word_right();
        assert_eq!(buf.cursor, 4);
        buf.move_word_right();
        assert_eq!(buf.cursor, 6);
        buf.move_word_left();
        assert_eq!(buf.cursor, 4);
    }

    #[test]
    fn unicode() {
        let mut buf = EditBuffer::new("Brühe");
        assert_eq!(buf.chars.len(), 5);
        buf.delete_back();
        buf.insert_char('é');
        assert_eq!(buf.text(), "Brühé");
    }

    #[test]
    fn vertical_moves_keep_column() {
        let mut buf = EditBuffer::new("aaa\nbbb\nccc");
        buf.cursor = 1;
        buf.move_down();
        assert_eq!(buf.cursor, 5);
        buf.move_down();
        assert_eq!(buf.cursor, 9);
        buf.move_up();
        buf.move_up();
        assert_eq!(buf.cursor, 1);
    }

    #[test]
    fn vertical_moves_clamp_to_shorter_line() {
        let mut buf = EditBuffer::new("hello\nab");
        buf.cursor = 4;
        buf.move_down();
        assert_eq!(buf.cursor, 8);

        let mut buf = EditBuffer::new("ab\nhello");
        buf.cursor = 7;
        buf.move_up();
        assert_eq!(buf.cursor, 2);
    }

    #[test]
    fn vertical_moves_at_edges() {
        let mut buf = EditBuffer::new("hello\nworld");
        buf.cursor = 3;
        buf.move_up();
        assert_eq!(buf.cursor, 0);
        buf.cursor = 8;
        buf.move_down();
        assert_eq!(buf.cursor, 11);
    }

    #[test]
    fn move_through_empty_line() {
        let mut buf = EditBuffer::new("hello\n\nworld");
        buf.cursor = 3;
        buf.move_down();
        assert_eq!(buf.cursor, 6);
        buf.move_up();
        assert_eq!(buf.cursor, 0);
    }

    #[test]
    fn line_col_tracks_newlines() {
        let mut buf = EditBuffer::new("1. a\n2. bc");
        assert_eq!(buf.line_col(), (1, 5));
        buf.cursor = 2;
        assert_eq!(buf.line_col(), (0, 2));
        buf.cursor = 5;
        assert_eq!(buf.line_col(), (1, 0));
    }

    #[test]
    fn text_before_cursor() {
        let mut buf = EditBuffer::new("1. a\n2. b");
        buf.cursor = 4;
        assert_eq!(buf.text_before_cursor(), "1. a");
    }

    #[test]
    fn apply_substitution_splices_link() {
        let mut buf = EditBuffer::new("Dazu [!Naan] reichen");
        let sub = Substitution {
            field: (),
            start: 5,
            end: 12,
            link: "[Naan](http://x/recipe/1)".into(),
        };
        assert!(buf.apply_substitution(&sub));
        assert_eq!(buf.text(), "Dazu [Naan](http://x/recipe/1) reichen");
        assert_eq!(buf.cursor, 30);
    }

    #[test]
    fn apply_substitution_rejects_shrunk_buffer() {
        let mut buf = EditBuffer::new("Dazu");
        let sub = Substitution {
            field: (),
            start: 5,
            end: 12,
            link: "[Naan](http://x/recipe/1)".into(),
        };
        assert!(!buf.apply_substitution(&sub));
        assert_eq!(buf.text(), "Dazu");
        assert_eq!(buf.cursor, 4);
    }
}
