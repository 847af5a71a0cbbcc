pub mod api;
pub mod error;
pub mod link;

// Convenience re-exports
pub use api::client::CookClient;
pub use api::types;
pub use error::{CookError, ErrorInfo, Result};
