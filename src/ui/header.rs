use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

pub struct Header<'a> {
    pub origin: &'a str,
    /// Time of the last draft save, already formatted.
    pub draft_saved: Option<&'a str>,
}

impl<'a> Widget for Header<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = Span::styled(
            " Neues Rezept ",
            Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

        let origin = Span::styled(
            format!(" [{}] ", self.origin),
            Style::default().fg(Color::Cyan).bg(Color::DarkGray),
        );

        let draft = match self.draft_saved {
            Some(time) => format!("Entwurf gespeichert {} ", time),
            None => String::new(),
        };

        let spacer_len = area.width.saturating_sub(
            title.width() as u16 + origin.width() as u16 + draft.chars().count() as u16,
        );
        let bg = Style::default().bg(Color::DarkGray);
        let spacer = Span::styled(" ".repeat(spacer_len as usize), bg);

        let draft = Span::styled(draft, Style::default().fg(Color::Gray).bg(Color::DarkGray));

        let line = Line::from(vec![title, origin, spacer, draft]);
        line.render(area, buf);
    }
}
