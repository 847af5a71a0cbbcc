use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block as WidgetBlock, BorderType, Borders, Widget};

use crate::app::form::{Field, RecipeForm};
use crate::edit_buffer::EditBuffer;

const LABEL_WIDTH: u16 = 18;

/// The recipe form: single-line fields as labelled rows, multi-line fields
/// as bordered boxes sharing the remaining height.
pub struct FormView<'a> {
    pub form: &'a RecipeForm,
}

fn constraint(field: Field) -> Constraint {
    match field {
        Field::Description => Constraint::Fill(1),
        Field::Ingredients | Field::Instructions => Constraint::Fill(2),
        _ => Constraint::Length(1),
    }
}

fn cursor_style() -> Style {
    Style::default().fg(Color::Black).bg(Color::White)
}

/// One text line with the cursor cell highlighted at `col`.
fn cursor_line(text: &[char], col: usize, style: Style) -> Line<'static> {
    let before: String = text[..col].iter().collect();
    let cursor_char = text.get(col).copied().unwrap_or(' ');
    let after: String = text.get(col + 1..).map(|s| s.iter().collect()).unwrap_or_default();
    let mut spans = vec![
        Span::styled(before, style),
        Span::styled(cursor_char.to_string(), cursor_style()),
    ];
    if !after.is_empty() {
        spans.push(Span::styled(after, style));
    }
    Line::from(spans)
}

fn render_single_line(field: Field, buffer: &EditBuffer, focused: bool, area: Rect, buf: &mut Buffer) {
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let label = Span::styled(
        format!(" {:<width$}", field.label(), width = LABEL_WIDTH as usize - 1),
        label_style,
    );
    let value_width = area.width.saturating_sub(LABEL_WIDTH) as usize;
    let value_style = if focused {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![label];
    if focused && value_width > 0 {
        // Scroll horizontally so the cursor stays visible
        let offset = (buffer.cursor + 1).saturating_sub(value_width);
        let visible = &buffer.chars[offset..];
        let shown = &visible[..visible.len().min(value_width)];
        let line = cursor_line(shown, buffer.cursor - offset, value_style);
        spans.extend(line.spans);
        let used: usize = spans.iter().skip(1).map(|s| s.width()).sum();
        spans.push(Span::styled(
            " ".repeat(value_width.saturating_sub(used)),
            value_style,
        ));
    } else {
        let text: String = buffer.chars.iter().take(value_width).collect();
        spans.push(Span::styled(text, value_style));
    }
    Line::from(spans).render(area, buf);
}

fn render_multi_line(field: Field, buffer: &EditBuffer, focused: bool, area: Rect, buf: &mut Buffer) {
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    let block = WidgetBlock::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", field.label()));
    let inner = block.inner(area);
    block.render(area, buf);
    if inner.height == 0 {
        return;
    }

    let style = Style::default().fg(Color::White);
    let lines: Vec<&[char]> = buffer.chars.split(|c| *c == '\n').collect();
    let (cursor_row, cursor_col) = buffer.line_col();
    let scroll = if focused {
        (cursor_row + 1).saturating_sub(inner.height as usize)
    } else {
        0
    };

    for (i, text) in lines
        .iter()
        .enumerate()
        .skip(scroll)
        .take(inner.height as usize)
    {
        let line = if focused && i == cursor_row {
            cursor_line(text, cursor_col, style)
        } else {
            Line::from(Span::styled(text.iter().collect::<String>(), style))
        };
        let row = Rect::new(inner.x, inner.y + (i - scroll) as u16, inner.width, 1);
        line.render(row, buf);
    }
}

impl<'a> Widget for FormView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let areas = Layout::vertical(Field::ALL.map(constraint)).split(area);
        for (field, field_area) in Field::ALL.into_iter().zip(areas.iter()) {
            let buffer = self.form.buffer(field);
            let focused = self.form.focused == field;
            if field.is_multiline() {
                render_multi_line(field, buffer, focused, *field_area, buf);
            } else {
                render_single_line(field, buffer, focused, *field_area, buf);
            }
        }
    }
}
