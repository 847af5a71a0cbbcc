use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::api::types::{LinkLookup, RecipeCandidate, ServerMessage};
use crate::error::ErrorInfo;
use crate::keys::preset::Action;
use crate::link::{DialogContent, Resolution};

use super::lists::continuation;
use super::state::{AppState, Effect};
use super::toast::ToastKind;

/// Printable input; AltGr arrives as Ctrl+Alt on several terminals and is
/// needed for `[` and `]` on German layouts.
fn typed_char(key: &KeyEvent) -> Option<char> {
    let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;
    match key.code {
        KeyCode::Char(ch)
            if key.modifiers == KeyModifiers::NONE
                || key.modifiers == KeyModifiers::SHIFT
                || key.modifiers == altgr =>
        {
            Some(ch)
        }
        _ => None,
    }
}

// --- Form-level actions ---

pub(super) fn handle_action(state: &mut AppState, action: &Action) -> Option<Effect> {
    match action {
        Action::Quit => {
            state.should_quit = true;
            Some(Effect::SaveDraft)
        }
        Action::NextField => {
            state.form.focused = state.form.focused.next();
            Some(Effect::SaveDraft)
        }
        Action::PrevField => {
            state.form.focused = state.form.focused.prev();
            Some(Effect::SaveDraft)
        }
        Action::Submit => {
            if state.submitting {
                return None;
            }
            state.submitting = true;
            Some(Effect::Submit(state.form.values()))
        }
        Action::CopyUrl => Some(Effect::CopyUrl),
        Action::Help => {
            state.show_help = true;
            None
        }
    }
}

// --- Field editing ---

pub(super) fn handle_edit_key(state: &mut AppState, key: &KeyEvent) -> Option<Effect> {
    let field = state.form.focused;

    if key.code == KeyCode::Enter && key.modifiers == KeyModifiers::NONE {
        if !field.is_multiline() {
            state.form.focused = field.next();
            return Some(Effect::SaveDraft);
        }
        let buffer = state.form.focused_buffer_mut();
        match field.list_style() {
            Some(style) => {
                let insert = continuation(style, &buffer.text_before_cursor());
                buffer.insert_str(&insert);
            }
            None => buffer.insert_char('\n'),
        }
        return None;
    }

    let buffer = state.form.focused_buffer_mut();
    let text_changed = if let Some(ch) = typed_char(key) {
        buffer.insert_char(ch);
        true
    } else {
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Backspace) => {
                buffer.delete_back();
                true
            }
            (KeyModifiers::NONE, KeyCode::Delete) => {
                buffer.delete_forward();
                true
            }
            (KeyModifiers::NONE, KeyCode::Left) => {
                buffer.move_left();
                false
            }
            (KeyModifiers::NONE, KeyCode::Right) => {
                buffer.move_right();
                false
            }
            (KeyModifiers::NONE, KeyCode::Up) => {
                buffer.move_up();
                false
            }
            (KeyModifiers::NONE, KeyCode::Down) => {
                buffer.move_down();
                false
            }
            (KeyModifiers::NONE, KeyCode::Home) | (KeyModifiers::CONTROL, KeyCode::Char('a')) => {
                buffer.move_home();
                false
            }
            (KeyModifiers::NONE, KeyCode::End) | (KeyModifiers::CONTROL, KeyCode::Char('e')) => {
                buffer.move_end();
                false
            }
            (KeyModifiers::ALT, KeyCode::Left) | (KeyModifiers::CONTROL, KeyCode::Left) => {
                buffer.move_word_left();
                false
            }
            (KeyModifiers::ALT, KeyCode::Right) | (KeyModifiers::CONTROL, KeyCode::Right) => {
                buffer.move_word_right();
                false
            }
            _ => false,
        }
    };

    if !text_changed || !field.watches_links() {
        return None;
    }
    let buffer = state.form.buffer(field);
    state
        .resolver
        .on_text_changed(field, &buffer.chars, buffer.cursor)
        .map(Effect::Lookup)
}

// --- Selection dialog ---

/// Enter or a digit picks an entry, arrows move the highlight, and any
/// other key dismisses the dialog.
pub(super) fn handle_dialog_key(state: &mut AppState, key: &KeyEvent) {
    let index = match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Up) => {
            state.dialog.select_prev();
            return;
        }
        (KeyModifiers::NONE, KeyCode::Down) => {
            state.dialog.select_next();
            return;
        }
        (KeyModifiers::NONE, KeyCode::Enter) => state.dialog.current().map(|d| d.selected),
        (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) => {
            c.to_digit(10).map(|d| d as usize - 1)
        }
        _ => None,
    };

    match index {
        Some(index) => choose_candidate(state, index),
        None => state.dialog.close(),
    }
}

fn choose_candidate(state: &mut AppState, index: usize) {
    let resolver = &mut state.resolver;
    let mut substitution = None;
    state.dialog.choose(index, |candidate: &RecipeCandidate| {
        substitution = resolver.choose(candidate);
    });
    if let Some(sub) = substitution {
        if !state.form.buffer_mut(sub.field).apply_substitution(&sub) {
            debug!(field = sub.field.name(), "link substitution no longer fits the buffer");
        }
    }
}

// --- Async results ---

pub(super) fn handle_link_looked_up(
    state: &mut AppState,
    generation: u64,
    result: Result<LinkLookup, ErrorInfo>,
) {
    let lookup = match result {
        Ok(lookup) => lookup,
        Err(err) => {
            state.resolver.on_failure(generation, &err);
            return;
        }
    };

    match state.resolver.on_response(generation, lookup) {
        Resolution::Substitute(sub) => {
            if !state.form.buffer_mut(sub.field).apply_substitution(&sub) {
                debug!(field = sub.field.name(), "link substitution no longer fits the buffer");
            }
        }
        Resolution::Choose(candidates) => {
            state.dialog.open(DialogContent::Candidates(candidates));
        }
        Resolution::Markup(body) => state.dialog.open(DialogContent::Markup(body)),
        Resolution::Nothing | Resolution::Stale => {}
    }
}

pub(super) fn handle_submitted(
    state: &mut AppState,
    result: Result<Option<ServerMessage>, ErrorInfo>,
) -> Option<Effect> {
    state.submitting = false;
    match result {
        Ok(Some(msg)) if msg.is_error => {
            state.toasts.notify_server(&msg);
            None
        }
        Ok(msg) => {
            if let Some(msg) = msg {
                state.toasts.notify_server(&msg);
            }
            state.form.clear();
            Some(Effect::DeleteDraft)
        }
        Err(err) => {
            state.toasts.notify(err.user_message(), ToastKind::Error);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::form::Field;
    use crate::app::test_helpers::*;

    fn naan() -> RecipeCandidate {
        RecipeCandidate {
            title: "Naan".into(),
            id: 3,
        }
    }

    fn type_into(state: &mut AppState, field: Field, text: &str) -> Option<Effect> {
        state.form.focused = field;
        let mut last = None;
        for ch in text.chars() {
            last = handle_edit_key(state, &char_key(ch));
        }
        last
    }

    #[test]
    fn typing_closing_bracket_dispatches_lookup() {
        let mut state = test_state();
        let effect = type_into(&mut state, Field::Ingredients, "- [!Naan]");
        match effect {
            Some(Effect::Lookup(req)) => assert_eq!(req.query, "Naan"),
            other => panic!("expected lookup, got {:?}", other),
        }
    }

    #[test]
    fn unwatched_field_never_looks_up() {
        let mut state = test_state();
        assert_eq!(type_into(&mut state, Field::Title, "[!Naan]"), None);
        assert!(state.resolver.pending().is_none());
    }

    #[test]
    fn altgr_brackets_are_typed() {
        let mut state = test_state();
        state.form.focused = Field::Instructions;
        let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;
        handle_edit_key(&mut state, &KeyEvent::new(KeyCode::Char('['), altgr));
        handle_edit_key(&mut state, &char_key('!'));
        handle_edit_key(&mut state, &char_key('x'));
        let effect = handle_edit_key(&mut state, &KeyEvent::new(KeyCode::Char(']'), altgr));
        assert!(matches!(effect, Some(Effect::Lookup(_))));
    }

    #[test]
    fn single_match_substitutes_in_place() {
        let mut state = test_state();
        let req = match type_into(&mut state, Field::Ingredients, "Dazu [!Naan]") {
            Some(Effect::Lookup(req)) => req,
            other => panic!("expected lookup, got {:?}", other),
        };
        handle_link_looked_up(&mut state, req.generation, Ok(LinkLookup::Single(naan())));

        let buf = state.form.buffer(Field::Ingredients);
        assert_eq!(buf.text(), "Dazu [Naan](http://127.0.0.1:8080/recipe/3)");
        assert_eq!(buf.cursor, buf.chars.len());
        assert!(!state.dialog.is_open());
    }

    #[test]
    fn response_after_marker_was_edited_leaves_text_alone() {
        let mut state = test_state();
        let req = match type_into(&mut state, Field::Ingredients, "Dazu [!Naan]") {
            Some(Effect::Lookup(req)) => req,
            other => panic!("expected lookup, got {:?}", other),
        };
        state
            .form
            .buffer_mut(Field::Ingredients)
            .set_text("Dazu Naan mit Joghurt");
        handle_link_looked_up(&mut state, req.generation, Ok(LinkLookup::Single(naan())));

        assert_eq!(
            state.form.buffer(Field::Ingredients).text(),
            "Dazu Naan mit Joghurt"
        );
    }

    #[test]
    fn several_matches_open_dialog_and_choice_substitutes() {
        let mut state = test_state();
        let req = match type_into(&mut state, Field::Instructions, "[!Na]") {
            Some(Effect::Lookup(req)) => req,
            other => panic!("expected lookup, got {:?}", other),
        };
        let candidates = vec![
            naan(),
            RecipeCandidate {
                title: "Nasi Goreng".into(),
                id: 8,
            },
        ];
        handle_link_looked_up(&mut state, req.generation, Ok(LinkLookup::Candidates(candidates)));
        assert!(state.dialog.is_open());

        handle_dialog_key(&mut state, &key(KeyCode::Down));
        handle_dialog_key(&mut state, &key(KeyCode::Enter));

        assert!(!state.dialog.is_open());
        assert_eq!(
            state.form.buffer(Field::Instructions).text(),
            "[Nasi Goreng](http://127.0.0.1:8080/recipe/8)"
        );
        assert!(state.resolver.pending().is_none());
    }

    #[test]
    fn digit_picks_candidate_directly() {
        let mut state = test_state();
        let req = match type_into(&mut state, Field::Ingredients, "[!N]") {
            Some(Effect::Lookup(req)) => req,
            other => panic!("expected lookup, got {:?}", other),
        };
        let candidates = vec![
            naan(),
            RecipeCandidate {
                title: "Nudeln".into(),
                id: 4,
            },
        ];
        handle_link_looked_up(&mut state, req.generation, Ok(LinkLookup::Candidates(candidates)));
        handle_dialog_key(&mut state, &char_key('2'));
        assert_eq!(
            state.form.buffer(Field::Ingredients).text(),
            "[Nudeln](http://127.0.0.1:8080/recipe/4)"
        );
    }

    #[test]
    fn other_key_dismisses_dialog_without_substituting() {
        let mut state = test_state();
        let req = match type_into(&mut state, Field::Ingredients, "[!N]") {
            Some(Effect::Lookup(req)) => req,
            other => panic!("expected lookup, got {:?}", other),
        };
        let candidates = vec![naan(), naan()];
        handle_link_looked_up(&mut state, req.generation, Ok(LinkLookup::Candidates(candidates)));
        handle_dialog_key(&mut state, &key(KeyCode::Esc));
        assert!(!state.dialog.is_open());
        assert_eq!(state.form.buffer(Field::Ingredients).text(), "[!N]");
    }

    #[test]
    fn markup_dialog_closes_on_enter_without_change() {
        let mut state = test_state();
        let req = match type_into(&mut state, Field::Ingredients, "[!N]") {
            Some(Effect::Lookup(req)) => req,
            other => panic!("expected lookup, got {:?}", other),
        };
        handle_link_looked_up(
            &mut state,
            req.generation,
            Ok(LinkLookup::Markup("<dialog>legacy</dialog>".into())),
        );
        assert!(state.dialog.is_open());
        handle_dialog_key(&mut state, &key(KeyCode::Enter));
        assert!(!state.dialog.is_open());
        assert_eq!(state.form.buffer(Field::Ingredients).text(), "[!N]");
    }

    #[test]
    fn stale_response_is_ignored() {
        let mut state = test_state();
        let first = match type_into(&mut state, Field::Ingredients, "[!Na]") {
            Some(Effect::Lookup(req)) => req,
            other => panic!("expected lookup, got {:?}", other),
        };
        handle_edit_key(&mut state, &key(KeyCode::Backspace));
        let second = match handle_edit_key(&mut state, &char_key(']')) {
            Some(Effect::Lookup(req)) => req,
            other => panic!("expected lookup, got {:?}", other),
        };
        assert_ne!(first.generation, second.generation);

        handle_link_looked_up(&mut state, first.generation, Ok(LinkLookup::Single(naan())));
        assert_eq!(state.form.buffer(Field::Ingredients).text(), "[!Na]");
    }

    #[test]
    fn failed_lookup_changes_nothing() {
        let mut state = test_state();
        let req = match type_into(&mut state, Field::Ingredients, "[!Naan]") {
            Some(Effect::Lookup(req)) => req,
            other => panic!("expected lookup, got {:?}", other),
        };
        handle_link_looked_up(
            &mut state,
            req.generation,
            Err(ErrorInfo::Network("connection refused".into())),
        );
        assert_eq!(state.form.buffer(Field::Ingredients).text(), "[!Naan]");
        assert!(!state.dialog.is_open());
        assert!(state.toasts.is_empty());
    }

    #[test]
    fn enter_continues_bullet_list() {
        let mut state = test_state();
        type_into(&mut state, Field::Ingredients, "- Mehl");
        handle_edit_key(&mut state, &key(KeyCode::Enter));
        assert_eq!(state.form.buffer(Field::Ingredients).text(), "- Mehl\n- ");
    }

    #[test]
    fn enter_continues_numbered_list() {
        let mut state = test_state();
        type_into(&mut state, Field::Instructions, "1. a");
        handle_edit_key(&mut state, &key(KeyCode::Enter));
        assert_eq!(state.form.buffer(Field::Instructions).text(), "1. a\n2. ");
    }

    #[test]
    fn enter_in_single_line_field_moves_focus_and_saves() {
        let mut state = test_state();
        type_into(&mut state, Field::Title, "Naan");
        let effect = handle_edit_key(&mut state, &key(KeyCode::Enter));
        assert_eq!(effect, Some(Effect::SaveDraft));
        assert_eq!(state.form.focused, Field::Description);
    }

    #[test]
    fn field_change_saves_draft() {
        let mut state = test_state();
        assert_eq!(
            handle_action(&mut state, &Action::NextField),
            Some(Effect::SaveDraft)
        );
        assert_eq!(state.form.focused, Field::Description);
        handle_action(&mut state, &Action::PrevField);
        assert_eq!(state.form.focused, Field::Title);
    }

    #[test]
    fn submit_is_not_sent_twice() {
        let mut state = test_state();
        type_into(&mut state, Field::Title, "Naan");
        match handle_action(&mut state, &Action::Submit) {
            Some(Effect::Submit(values)) => assert_eq!(values[0], ("title", "Naan".into())),
            other => panic!("expected submit, got {:?}", other),
        }
        assert_eq!(handle_action(&mut state, &Action::Submit), None);
    }

    #[test]
    fn successful_submit_clears_form_and_deletes_draft() {
        let mut state = test_state();
        type_into(&mut state, Field::Title, "Naan");
        state.submitting = true;
        let effect = handle_submitted(
            &mut state,
            Ok(Some(ServerMessage {
                value: "Rezept eingereicht".into(),
                is_error: false,
            })),
        );
        assert_eq!(effect, Some(Effect::DeleteDraft));
        assert!(state.form.is_blank());
        assert!(!state.submitting);
        assert_eq!(state.toasts.items()[0].message, "Rezept eingereicht");
    }

    #[test]
    fn failed_submit_keeps_form_and_shows_error() {
        let mut state = test_state();
        type_into(&mut state, Field::Title, "Naan");
        let effect = handle_submitted(
            &mut state,
            Err(ErrorInfo::Api {
                status: 200,
                body: "Titel fehlt".into(),
            }),
        );
        assert_eq!(effect, None);
        assert_eq!(state.form.buffer(Field::Title).text(), "Naan");
        assert_eq!(state.toasts.items()[0].kind, ToastKind::Error);
        assert_eq!(state.toasts.items()[0].message, "Titel fehlt");
    }

    #[test]
    fn quit_saves_draft() {
        let mut state = test_state();
        assert_eq!(handle_action(&mut state, &Action::Quit), Some(Effect::SaveDraft));
        assert!(state.should_quit);
    }
}
