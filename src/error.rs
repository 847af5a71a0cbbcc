use thiserror::Error;

#[derive(Debug, Error)]
pub enum CookError {
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Config error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

pub type Result<T> = std::result::Result<T, CookError>;

/// Structured error data for the message channel
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorInfo {
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("{0}")]
    Network(String),
}

impl ErrorInfo {
    pub fn from_cook_error(e: &CookError) -> Self {
        match e {
            CookError::Api { status, message } => ErrorInfo::Api {
                status: *status,
                body: message.clone(),
            },
            _ => ErrorInfo::Network(e.to_string()),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ErrorInfo::Api { status, body } => api_message(*status, body),
            ErrorInfo::Network(_) => "Server nicht erreichbar".into(),
        }
    }
}

impl CookError {
    /// Short German message suitable for a toast, matching the wording the
    /// recipe site uses for its own notifications.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { status, message } => api_message(*status, message),
            Self::Http(_) => "Server nicht erreichbar".into(),
            Self::Clipboard(_) => "Kopieren fehlgeschlagen".into(),
            Self::Config(msg) => truncate(msg, 80),
            Self::Io(_) | Self::Json(_) | Self::TomlDe(_) => "Interner Fehler".into(),
        }
    }
}

fn api_message(status: u16, body: &str) -> String {
    let detail = extract_json_message(body).unwrap_or_else(|| body.to_string());
    if detail.trim().is_empty() {
        format!("Serverfehler ({})", status)
    } else {
        truncate(detail.trim(), 80)
    }
}

fn extract_json_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(String::from))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
