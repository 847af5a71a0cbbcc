use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block as WidgetBlock, BorderType, Borders, Clear, Widget};

use crate::link::{DialogContent, OpenDialog};

const MAX_VISIBLE: usize = 10;

/// Modal recipe selection popup, centred in `area`.
pub struct SelectionPopup<'a> {
    pub dialog: &'a OpenDialog,
}

impl SelectionPopup<'_> {
    fn body_lines(&self, width: usize) -> Vec<Line<'static>> {
        match &self.dialog.content {
            DialogContent::Candidates(candidates) => {
                let scroll_offset = (self.dialog.selected + 1).saturating_sub(MAX_VISIBLE);
                candidates
                    .iter()
                    .enumerate()
                    .skip(scroll_offset)
                    .take(MAX_VISIBLE)
                    .map(|(i, candidate)| {
                        let style = if i == self.dialog.selected {
                            Style::default().fg(Color::White).bg(Color::DarkGray)
                        } else {
                            Style::default().fg(Color::Gray)
                        };
                        let number = if i < 9 {
                            format!("{} ", i + 1)
                        } else {
                            "  ".to_string()
                        };
                        let text = format!("{}{}", number, candidate.title);
                        let display: String = text.chars().take(width).collect();
                        let padding = width.saturating_sub(display.chars().count());
                        Line::from(Span::styled(
                            format!("{}{}", display, " ".repeat(padding)),
                            style,
                        ))
                    })
                    .collect()
            }
            DialogContent::Markup(body) => body
                .lines()
                .take(MAX_VISIBLE)
                .map(|l| Line::styled(l.to_string(), Style::default().fg(Color::Gray)))
                .collect(),
        }
    }
}

impl Widget for SelectionPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_width = (area.width * 60 / 100).max(30).min(area.width);
        let inner_width = popup_width.saturating_sub(2) as usize;
        let lines = self.body_lines(inner_width);
        let body_height = lines.len().max(1);
        let popup_height = ((body_height + 3) as u16).min(area.height); // +2 borders +1 footer
        let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_height)) / 2;

        let popup_area = Rect::new(x, y, popup_width, popup_height);
        Clear.render(popup_area, buf);

        let title = match self.dialog.content {
            DialogContent::Candidates(_) => " Rezept wählen ",
            DialogContent::Markup(_) => " Rezeptauswahl ",
        };
        let block = WidgetBlock::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title);
        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        for (i, line) in lines.into_iter().enumerate() {
            if i as u16 >= inner.height.saturating_sub(1) {
                break;
            }
            line.render(Rect::new(inner.x, inner.y + i as u16, inner.width, 1), buf);
        }

        // Footer
        if inner.height > 0 {
            let hint = match self.dialog.content {
                DialogContent::Candidates(_) => "Enter/1-9 übernehmen, andere Taste schließt",
                DialogContent::Markup(_) => "Beliebige Taste schließt",
            };
            let footer = Line::styled(hint, Style::default().fg(Color::DarkGray));
            let footer_area = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
            footer.render(footer_area, buf);
        }
    }
}
