use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Widget};

use crate::app::toast::{Toast, ToastKind};

/// Notifications stacked in the bottom-right corner, newest at the bottom.
pub struct ToastStack<'a> {
    pub toasts: &'a [Toast],
}

impl Widget for ToastStack<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let visible = self.toasts.len().min(area.height as usize);
        let shown = &self.toasts[self.toasts.len() - visible..];

        for (i, toast) in shown.iter().enumerate() {
            let (marker, color) = match toast.kind {
                ToastKind::Success => ("✓", Color::Green),
                ToastKind::Error => ("✗", Color::Red),
            };
            let text = format!(" {} {} ", marker, toast.message);
            let width = (Span::raw(text.as_str()).width() as u16).min(area.width);
            let x = area.x + area.width - width;
            let y = area.y + area.height - (visible - i) as u16;
            let toast_area = Rect::new(x, y, width, 1);

            Clear.render(toast_area, buf);
            Line::from(Span::styled(
                text,
                Style::default()
                    .fg(Color::Black)
                    .bg(color)
                    .add_modifier(Modifier::BOLD),
            ))
            .render(toast_area, buf);
        }
    }
}
