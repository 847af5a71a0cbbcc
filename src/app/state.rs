use chrono::{DateTime, Local};

use crate::api::types::{LinkLookup, ServerMessage};
use crate::error::ErrorInfo;
use crate::link::{LinkResolver, LookupRequest, SelectDialog};

use super::form::{Field, RecipeForm};
use super::toast::Toasts;

#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    Key(crossterm::event::KeyEvent),
    LinkLookedUp {
        generation: u64,
        result: Result<LinkLookup, ErrorInfo>,
    },
    Submitted(Result<Option<ServerMessage>, ErrorInfo>),
    Tick,
}

/// Side effects a handler asks the run loop to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Lookup(LookupRequest),
    SaveDraft,
    DeleteDraft,
    Submit(Vec<(&'static str, String)>),
    CopyUrl,
}

pub struct AppState {
    pub origin: String,
    pub form: RecipeForm,
    pub resolver: LinkResolver<Field>,
    pub dialog: SelectDialog,
    pub toasts: Toasts,
    pub hints: Vec<(String, &'static str)>,
    pub show_help: bool,
    pub submitting: bool,
    pub draft_saved_at: Option<DateTime<Local>>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(origin: &str, toast_millis: u64, hints: Vec<(String, &'static str)>) -> Self {
        Self {
            origin: origin.to_string(),
            form: RecipeForm::new(),
            resolver: LinkResolver::new(origin),
            dialog: SelectDialog::new(),
            toasts: Toasts::new(toast_millis),
            hints,
            show_help: false,
            submitting: false,
            draft_saved_at: None,
            should_quit: false,
        }
    }
}
