use std::collections::HashMap;

use crate::edit_buffer::EditBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    CookingDuration,
    TotalDuration,
    Author,
    Source,
    Tags,
    Ingredients,
    Instructions,
}

/// How Enter continues a list in a multi-line field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    Bullet,
    Numbered,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Title,
        Field::Description,
        Field::CookingDuration,
        Field::TotalDuration,
        Field::Author,
        Field::Source,
        Field::Tags,
        Field::Ingredients,
        Field::Instructions,
    ];

    /// Form field name as the server expects it.
    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::CookingDuration => "cookingDuration",
            Self::TotalDuration => "totalDuration",
            Self::Author => "author",
            Self::Source => "source",
            Self::Tags => "tags",
            Self::Ingredients => "ingredients",
            Self::Instructions => "instructions",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Titel",
            Self::Description => "Beschreibung",
            Self::CookingDuration => "Kochzeit (min)",
            Self::TotalDuration => "Gesamtzeit (min)",
            Self::Author => "Autor",
            Self::Source => "Quelle",
            Self::Tags => "Tags",
            Self::Ingredients => "Zutaten",
            Self::Instructions => "Anleitung",
        }
    }

    pub fn is_multiline(self) -> bool {
        matches!(
            self,
            Self::Description | Self::Ingredients | Self::Instructions
        )
    }

    /// Fields whose edits are scanned for `[!query]` tokens.
    pub fn watches_links(self) -> bool {
        matches!(self, Self::Ingredients | Self::Instructions)
    }

    pub fn list_style(self) -> Option<ListStyle> {
        match self {
            Self::Ingredients => Some(ListStyle::Bullet),
            Self::Instructions => Some(ListStyle::Numbered),
            _ => None,
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// The new-recipe form: one buffer per field plus the focused field.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeForm {
    buffers: [EditBuffer; 9],
    pub focused: Field,
}

impl Default for RecipeForm {
    fn default() -> Self {
        Self {
            buffers: Default::default(),
            focused: Field::Title,
        }
    }
}

impl RecipeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self, field: Field) -> &EditBuffer {
        &self.buffers[field.index()]
    }

    pub fn buffer_mut(&mut self, field: Field) -> &mut EditBuffer {
        &mut self.buffers[field.index()]
    }

    pub fn focused_buffer(&self) -> &EditBuffer {
        self.buffer(self.focused)
    }

    pub fn focused_buffer_mut(&mut self) -> &mut EditBuffer {
        self.buffer_mut(self.focused)
    }

    /// Field name/value pairs in form order.
    pub fn values(&self) -> Vec<(&'static str, String)> {
        Field::ALL
            .iter()
            .map(|f| (f.name(), self.buffer(*f).text()))
            .collect()
    }

    /// Fills fields from a saved draft; fields absent from `values` become
    /// empty and unknown keys are ignored.
    pub fn load_values(&mut self, values: &HashMap<String, String>) {
        for field in Field::ALL {
            let text = values.get(field.name()).map(String::as_str).unwrap_or("");
            self.buffer_mut(field).set_text(text);
        }
    }

    pub fn is_blank(&self) -> bool {
        self.buffers.iter().all(EditBuffer::is_empty)
    }

    pub fn clear(&mut self) {
        for buf in &mut self.buffers {
            buf.clear();
        }
        self.focused = Field::Title;
    }
}
