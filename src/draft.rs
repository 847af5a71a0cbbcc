use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Key under which the unsubmitted new-recipe form is kept.
pub const RECIPE_NEW_KEY: &str = "recipe_new";

const STORE_FILE: &str = "storage.json";

/// Durable string key-value store backed by one JSON file. Values are
/// opaque strings; the form draft is itself stored as a JSON string.
#[derive(Debug, Clone)]
pub struct DraftStore {
    path: PathBuf,
}

impl DraftStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    pub fn save_form(&self, fields: &[(&str, String)]) -> Result<()> {
        let recipe: BTreeMap<&str, &str> = fields
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        self.set_item(RECIPE_NEW_KEY, &serde_json::to_string(&recipe)?)
    }

    /// `None` when nothing was saved or the draft was deleted.
    pub fn load_form(&self) -> Result<Option<HashMap<String, String>>> {
        let raw = match self.get_item(RECIPE_NEW_KEY)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(None),
        };
        let recipe: Option<HashMap<String, String>> = serde_json::from_str(&raw)?;
        Ok(recipe)
    }

    pub fn delete_form(&self) -> Result<()> {
        self.set_item(RECIPE_NEW_KEY, "")
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(items)?)?;
        Ok(())
    }
}
