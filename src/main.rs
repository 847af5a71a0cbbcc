// Re-export library modules so binary-internal modules can use crate::api::, crate::error:: and crate::link::
pub(crate) use lethimcook::{api, error, link};

mod app;
mod config;
mod draft;
mod edit_buffer;
mod keys;
mod ui;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use config::AppConfig;
use draft::DraftStore;
use tracing_subscriber::EnvFilter;

fn config_path() -> PathBuf {
    AppConfig::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.toml")
}

/// Logs go to `cook.log` in the data dir; the terminal belongs to the UI.
fn init_logging(data_dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let log_file = std::fs::File::create(data_dir.join("cook.log"))?;

    let filter = EnvFilter::try_from_env("COOK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = config_path();

    if !path.exists() {
        AppConfig::write_default(&path)?;
        eprintln!(
            "Created default config at: {}\nPlease set the recipe server origin (and session token, if any), then run again.",
            path.display()
        );
        return Ok(());
    }

    let config = match AppConfig::load_from_path(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", path.display(), e);
            eprintln!("Fix the config file or delete it to regenerate defaults.");
            return Ok(());
        }
    };

    let data_dir = AppConfig::data_dir().unwrap_or_else(|| PathBuf::from("."));
    init_logging(&data_dir)?;
    tracing::info!(origin = %config.server.origin, "starting recipe form");

    let store = DraftStore::in_dir(&data_dir);

    let mut terminal = ratatui::init();

    // Enable enhanced keyboard protocol (reports Cmd/Super on supported terminals)
    let _ = crossterm::execute!(
        std::io::stdout(),
        crossterm::event::PushKeyboardEnhancementFlags(
            crossterm::event::KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
        )
    );

    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::event::PopKeyboardEnhancementFlags
        );
        ratatui::restore();
        hook(info);
    }));

    let result = app::run(&config, store, &mut terminal).await;

    let _ = crossterm::execute!(
        std::io::stdout(),
        crossterm::event::PopKeyboardEnhancementFlags
    );
    ratatui::restore();

    if let Err(e) = result {
        tracing::error!(error = %e, "recipe form exited with an error");
        eprintln!("Error: {}", e);
    }

    Ok(())
}
