pub mod dialog;
pub mod form_view;
pub mod header;
pub mod status_bar;
pub mod toasts;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block as WidgetBlock, BorderType, Borders, Clear};
use ratatui::Frame;

use crate::app::AppState;

use dialog::SelectionPopup;
use form_view::FormView;
use header::Header;
use status_bar::StatusBar;
use toasts::ToastStack;

pub fn render(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(frame.area());

    let saved = state
        .draft_saved_at
        .map(|t| t.format("%H:%M").to_string());
    let header = Header {
        origin: &state.origin,
        draft_saved: saved.as_deref(),
    };
    frame.render_widget(header, chunks[0]);

    frame.render_widget(FormView { form: &state.form }, chunks[1]);

    if let Some(dialog) = state.dialog.current() {
        frame.render_widget(SelectionPopup { dialog }, chunks[1]);
    }

    if state.show_help {
        render_help_popup(frame, &state.hints, chunks[1]);
    }

    frame.render_widget(
        ToastStack {
            toasts: state.toasts.items(),
        },
        chunks[1],
    );

    let focused = state.form.focused;
    let status = StatusBar {
        hints: &state.hints,
        message: state.submitting.then_some("Wird gesendet..."),
        line_col: focused
            .is_multiline()
            .then(|| state.form.focused_buffer().line_col()),
    };
    frame.render_widget(status, chunks[2]);
}

fn render_help_popup(frame: &mut Frame, hints: &[(String, &str)], area: Rect) {
    let line_count = hints.len() + 1; // + link syntax line
    let popup_height = (line_count + 3).min(area.height as usize) as u16; // +2 borders +1 footer
    let popup_width = (area.width * 60 / 100).max(30).min(area.width);
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(x, y, popup_width, popup_height);
    frame.render_widget(Clear, popup_area);

    let block = WidgetBlock::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Hilfe ");

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(Color::Yellow);
    let mut lines: Vec<Line> = hints
        .iter()
        .map(|(key_str, action_name)| {
            Line::from(vec![
                Span::styled(format!("{:>12}", key_str), key_style),
                Span::raw("  "),
                Span::styled(*action_name, Style::default().fg(Color::White)),
            ])
        })
        .collect();
    lines.push(Line::from(vec![
        Span::styled(format!("{:>12}", "[!Name]"), key_style),
        Span::raw("  "),
        Span::styled(
            "Rezeptlink in Zutaten/Anleitung",
            Style::default().fg(Color::White),
        ),
    ]));

    for (i, line) in lines.into_iter().enumerate() {
        if i as u16 >= inner.height.saturating_sub(1) {
            break;
        }
        let line_area = Rect::new(inner.x, inner.y + i as u16, inner.width, 1);
        frame.render_widget(line, line_area);
    }

    // Footer
    if inner.height > 0 {
        let footer_y = inner.y + inner.height - 1;
        let footer = Line::styled(
            "Beliebige Taste schließt",
            Style::default().fg(Color::DarkGray),
        );
        let footer_area = Rect::new(inner.x, footer_y, inner.width, 1);
        frame.render_widget(footer, footer_area);
    }
}
