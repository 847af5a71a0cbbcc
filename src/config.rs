use std::collections::HashMap;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{CookError, Result};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub origin: String,
    /// Session cookie value; admins see pending recipes in link lookups.
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UiConfig {
    #[serde(default = "default_toast_millis")]
    pub toast_millis: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_millis: default_toast_millis(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct KeybindingsConfig {
    #[serde(default)]
    pub bindings: HashMap<String, String>,
}

fn default_toast_millis() -> u64 {
    3000
}

impl AppConfig {
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        let mut config: AppConfig = Figment::new()
            .merge(Serialized::defaults(AppConfig::defaults()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("COOK_").split("__"))
            .extract()
            .map_err(|e| CookError::Config(e.to_string()))?;

        config.validate()?;
        config.server.origin = config.server.origin.trim_end_matches('/').to_string();
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let origin = self.server.origin.trim();
        if origin.is_empty() {
            return Err(CookError::Config("server.origin is required".into()));
        }
        if !origin.starts_with("http://") && !origin.starts_with("https://") {
            return Err(CookError::Config(format!(
                "server.origin must start with http:// or https:// (got '{}')",
                origin
            )));
        }
        if self.ui.toast_millis == 0 {
            return Err(CookError::Config("ui.toast_millis must be positive".into()));
        }
        Ok(())
    }

    pub fn config_dir() -> Option<PathBuf> {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(|xdg| PathBuf::from(xdg).join("lethimcook"))
            .or_else(|| {
                directories::BaseDirs::new()
                    .map(|dirs| dirs.home_dir().join(".config").join("lethimcook"))
            })
    }

    /// Holds the draft store and the log file.
    pub fn data_dir() -> Option<PathBuf> {
        std::env::var("XDG_DATA_HOME")
            .ok()
            .map(|xdg| PathBuf::from(xdg).join("lethimcook"))
            .or_else(|| {
                directories::BaseDirs::new()
                    .map(|dirs| dirs.home_dir().join(".local").join("share").join("lethimcook"))
            })
    }

    pub fn write_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = r#"[server]
origin = "http://127.0.0.1:8080"
token = ""  # session cookie, or set COOK_SERVER__TOKEN

[ui]
toast_millis = 3000

# Override specific keys:
# [keybindings.bindings]
# submit = "Ctrl+s"
# copy_url = "Ctrl+y"
"#;

        std::fs::write(path, content)?;
        Ok(())
    }

    fn defaults() -> Self {
        Self {
            server: ServerConfig {
                origin: String::new(),
                token: String::new(),
            },
            ui: UiConfig::default(),
            keybindings: KeybindingsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_valid_config_from_toml() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
[server]
origin = "https://rezepte.example.org/"
token = "jwt"

[ui]
toast_millis = 5000
"#,
        );

        let config = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(config.server.origin, "https://rezepte.example.org");
        assert_eq!(config.server.token, "jwt");
        assert_eq!(config.ui.toast_millis, 5000);
    }

    #[test]
    fn defaults_apply_for_missing_optional_fields() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
[server]
origin = "http://127.0.0.1:8080"
"#,
        );

        let config = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(config.server.token, "");
        assert_eq!(config.ui.toast_millis, 3000);
        assert!(config.keybindings.bindings.is_empty());
    }

    #[test]
    fn validate_fails_without_origin() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
[server]
origin = ""
"#,
        );

        let msg = AppConfig::load_from_path(&path).unwrap_err().to_string();
        assert!(msg.contains("server.origin"));
    }

    #[test]
    fn validate_fails_without_scheme() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
[server]
origin = "localhost:8080"
"#,
        );

        let msg = AppConfig::load_from_path(&path).unwrap_err().to_string();
        assert!(msg.contains("http://"));
    }

    #[test]
    fn validate_rejects_zero_toast_time() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
[server]
origin = "http://127.0.0.1:8080"

[ui]
toast_millis = 0
"#,
        );

        assert!(AppConfig::load_from_path(&path).is_err());
    }

    #[test]
    fn write_default_creates_loadable_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("subdir").join("config.toml");

        AppConfig::write_default(&path).unwrap();

        assert!(path.exists());
        let config = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(config.server.origin, "http://127.0.0.1:8080");
    }

    #[test]
    fn keybinding_overrides_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
[server]
origin = "http://127.0.0.1:8080"

[keybindings.bindings]
submit = "Ctrl+Enter"
copy_url = "F5"
"#,
        );

        let config = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(config.keybindings.bindings.get("submit").unwrap(), "Ctrl+Enter");
        assert_eq!(config.keybindings.bindings.get("copy_url").unwrap(), "F5");
    }

    #[test]
    fn config_dir_returns_some() {
        assert!(AppConfig::config_dir().is_some());
        assert!(AppConfig::data_dir().is_some());
    }
}
