//! `[!query]` recipe link completion: token extraction, lookup bookkeeping
//! and the candidate selection dialog.

pub mod dialog;
pub mod extract;
pub mod resolver;

pub use dialog::{DialogContent, OpenDialog, SelectDialog};
pub use extract::{extract, Extraction};
pub use resolver::{
    markdown_link, LinkResolver, LookupRequest, PendingSubstitution, Resolution, Substitution,
};
