use crate::api::types::RecipeCandidate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogContent {
    Candidates(Vec<RecipeCandidate>),
    /// Legacy server-rendered dialog, shown as-is.
    Markup(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenDialog {
    pub content: DialogContent,
    pub selected: usize,
}

impl OpenDialog {
    pub fn candidates(&self) -> &[RecipeCandidate] {
        match &self.content {
            DialogContent::Candidates(c) => c,
            DialogContent::Markup(_) => &[],
        }
    }
}

/// Recipe selection dialog: closed -> open -> closed.
///
/// At most one instance is open; opening again replaces the previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectDialog {
    current: Option<OpenDialog>,
}

impl SelectDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, content: DialogContent) {
        self.close();
        self.current = Some(OpenDialog {
            content,
            selected: 0,
        });
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&OpenDialog> {
        self.current.as_ref()
    }

    pub fn select_prev(&mut self) {
        if let Some(d) = &mut self.current {
            d.selected = d.selected.saturating_sub(1);
        }
    }

    pub fn select_next(&mut self) {
        if let Some(d) = &mut self.current {
            let len = d.candidates().len();
            if len > 0 && d.selected < len - 1 {
                d.selected += 1;
            }
        }
    }

    /// Picks the highlighted entry.
    pub fn choose_selected<C>(&mut self, on_choice: C) -> bool
    where
        C: FnOnce(&RecipeCandidate),
    {
        let index = match &self.current {
            Some(d) => d.selected,
            None => return false,
        };
        self.choose(index, on_choice)
    }

    /// Invokes `on_choice` with the entry at `index` and closes the dialog.
    /// An out-of-range index (or a markup dialog) closes without choosing.
    pub fn choose<C>(&mut self, index: usize, on_choice: C) -> bool
    where
        C: FnOnce(&RecipeCandidate),
    {
        let Some(dialog) = self.current.take() else {
            return false;
        };
        match dialog.candidates().get(index) {
            Some(candidate) => {
                on_choice(candidate);
                true
            }
            None => false,
        }
    }
}
