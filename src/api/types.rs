use serde::{Deserialize, Serialize};

/// A recipe the link lookup matched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecipeCandidate {
    pub title: String,
    pub id: u64,
}

/// Decoded body of `GET /recipe/link`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkLookup {
    /// Exactly one recipe matched.
    Single(RecipeCandidate),
    /// Zero or several recipes matched.
    Candidates(Vec<RecipeCandidate>),
    /// Server-rendered selection dialog, shown verbatim.
    Markup(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LinkPayload {
    One(RecipeCandidate),
    Many(Vec<RecipeCandidate>),
}

impl LinkLookup {
    /// Structured JSON first; any other body is kept as opaque markup.
    pub fn decode(body: &str) -> Self {
        match serde_json::from_str::<LinkPayload>(body) {
            Ok(LinkPayload::One(candidate)) => Self::Single(candidate),
            Ok(LinkPayload::Many(candidates)) => Self::Candidates(candidates),
            Err(_) => Self::Markup(body.to_string()),
        }
    }
}

/// User-facing message the server attaches to form responses via the
/// `HX-Trigger` header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerMessage {
    pub value: String,
    #[serde(rename = "isError", default)]
    pub is_error: bool,
}

#[derive(Deserialize)]
struct TriggerPayload {
    message: String,
}

impl ServerMessage {
    /// The header value is `{"message": "<json-encoded ServerMessage>"}`.
    pub fn from_trigger_header(raw: &str) -> Option<Self> {
        let payload: TriggerPayload = serde_json::from_str(raw).ok()?;
        serde_json::from_str(&payload.message).ok()
    }
}
