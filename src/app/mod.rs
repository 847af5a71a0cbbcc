mod clipboard;
pub mod form;
mod input;
mod lists;
mod state;
mod tasks;
pub mod toast;
pub use state::*;

use input::{
    handle_action, handle_dialog_key, handle_edit_key, handle_link_looked_up, handle_submitted,
};
use tasks::{spawn_lookup_link, spawn_submit};

#[cfg(test)]
pub(crate) mod test_helpers;

use std::time::Duration;

use chrono::Local;
use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::api::client::CookClient;
use crate::config::AppConfig;
use crate::draft::DraftStore;
use crate::error::Result;
use crate::keys::KeybindingMap;
use toast::{ToastKind, TICK_MILLIS};

/// Routes a key press: open popups first, then bound actions, then text
/// editing in the focused field.
pub fn handle_key(
    state: &mut AppState,
    key: &KeyEvent,
    keybindings: &KeybindingMap,
) -> Option<Effect> {
    if state.show_help {
        // Any key closes help
        state.show_help = false;
        return None;
    }
    if state.dialog.is_open() {
        handle_dialog_key(state, key);
        return None;
    }
    if let Some(action) = keybindings.resolve(key) {
        return handle_action(state, action);
    }
    handle_edit_key(state, key)
}

pub fn restore_draft(state: &mut AppState, store: &DraftStore) {
    match store.load_form() {
        Ok(Some(values)) => {
            state.form.load_values(&values);
            info!(path = %store.path().display(), "restored recipe draft");
        }
        Ok(None) => {}
        Err(e) => warn!(error = %e, "could not read recipe draft"),
    }
}

pub fn save_draft(state: &mut AppState, store: &DraftStore) {
    match store.save_form(&state.form.values()) {
        Ok(()) => state.draft_saved_at = Some(Local::now()),
        Err(e) => warn!(error = %e, "could not save recipe draft"),
    }
}

pub fn delete_draft(state: &mut AppState, store: &DraftStore) {
    match store.delete_form() {
        Ok(()) => state.draft_saved_at = None,
        Err(e) => warn!(error = %e, "could not delete recipe draft"),
    }
}

fn copy_page_url(state: &mut AppState, url: &str) {
    match clipboard::copy_to_clipboard(&mut std::io::stdout(), url) {
        Ok(()) => state.toasts.notify("Link kopiert", ToastKind::Success),
        Err(e) => {
            warn!(error = %e, "clipboard copy failed");
            state.toasts.notify(e.user_message(), ToastKind::Error);
        }
    }
}

fn apply_effect(
    effect: Effect,
    state: &mut AppState,
    client: &CookClient,
    store: &DraftStore,
    tx: &mpsc::UnboundedSender<AppMessage>,
) {
    match effect {
        Effect::Lookup(request) => spawn_lookup_link(client, request, tx),
        Effect::SaveDraft => save_draft(state, store),
        Effect::DeleteDraft => delete_draft(state, store),
        Effect::Submit(fields) => spawn_submit(client, fields, tx),
        Effect::CopyUrl => copy_page_url(state, &client.new_recipe_url()),
    }
}

pub async fn run(config: &AppConfig, store: DraftStore, terminal: &mut DefaultTerminal) -> Result<()> {
    let keybindings = KeybindingMap::from_config(&config.keybindings.bindings)?;

    let mut state = AppState::new(
        &config.server.origin,
        config.ui.toast_millis,
        keybindings.hints(),
    );
    restore_draft(&mut state, &store);

    let (tx, mut rx) = mpsc::unbounded_channel::<AppMessage>();

    let client = CookClient::new(&config.server.origin, &config.server.token);

    // Spawn event reader task
    let event_tx = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if event_tx.send(AppMessage::Key(key)).is_err() {
                        break;
                    }
                }
                Some(Err(_)) => break,
                None => break,
                _ => {}
            }
        }
    });

    // Spawn tick timer
    let tick_tx = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(TICK_MILLIS));
        loop {
            interval.tick().await;
            if tick_tx.send(AppMessage::Tick).is_err() {
                break;
            }
        }
    });

    // Main loop
    loop {
        terminal.draw(|frame| crate::ui::render(frame, &state))?;

        if let Some(msg) = rx.recv().await {
            let effect = match msg {
                AppMessage::Key(key) => handle_key(&mut state, &key, &keybindings),
                AppMessage::LinkLookedUp { generation, result } => {
                    handle_link_looked_up(&mut state, generation, result);
                    None
                }
                AppMessage::Submitted(result) => handle_submitted(&mut state, result),
                AppMessage::Tick => {
                    state.toasts.tick();
                    None
                }
            };
            if let Some(effect) = effect {
                apply_effect(effect, &mut state, &client, &store, &tx);
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
