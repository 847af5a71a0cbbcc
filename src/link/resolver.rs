use tracing::{debug, warn};

use crate::api::types::{LinkLookup, RecipeCandidate};
use crate::error::ErrorInfo;

use super::extract::{extract, Extraction};

/// Where a lookup's result must be spliced once it arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubstitution<F> {
    pub generation: u64,
    pub field: F,
    pub start: usize,
    pub end: usize,
}

/// A lookup the caller has to dispatch; the generation ties the response
/// back to the pending substitution it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub generation: u64,
    pub query: String,
}

/// A ready-to-apply replacement of `[!query]` with a markdown link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution<F> {
    pub field: F,
    pub start: usize,
    pub end: usize,
    pub link: String,
}

impl<F> Substitution<F> {
    pub fn cursor_after(&self) -> usize {
        self.start + self.link.chars().count()
    }

    /// Splices the link into `chars` and returns the new cursor position.
    /// Returns `None` without touching the buffer if the offsets no longer
    /// cover a `[!...]` marker.
    pub fn apply(&self, chars: &mut Vec<char>) -> Option<usize> {
        let span = chars.get(self.start..self.end)?;
        if span.len() < 3 || !span.starts_with(&['[', '!']) || !span.ends_with(&[']']) {
            return None;
        }
        chars.splice(self.start..self.end, self.link.chars());
        Some(self.cursor_after())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<F> {
    Substitute(Substitution<F>),
    Choose(Vec<RecipeCandidate>),
    Markup(String),
    Nothing,
    /// The response belongs to a superseded lookup and was dropped.
    Stale,
}

pub fn markdown_link(origin: &str, candidate: &RecipeCandidate) -> String {
    format!(
        "[{}]({}/recipe/{})",
        candidate.title,
        origin.trim_end_matches('/'),
        candidate.id
    )
}

/// Owns the single outstanding pending substitution.
///
/// Every dispatched lookup gets a new generation and overwrites the pending
/// state. Responses carrying any other generation are dropped, so a slow
/// answer to an old query can never patch the buffer with stale offsets.
/// Requests themselves are never cancelled.
#[derive(Debug)]
pub struct LinkResolver<F> {
    origin: String,
    generation: u64,
    pending: Option<PendingSubstitution<F>>,
}

impl<F> LinkResolver<F> {
    pub fn new(origin: &str) -> Self {
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            generation: 0,
            pending: None,
        }
    }

    pub fn pending(&self) -> Option<&PendingSubstitution<F>> {
        self.pending.as_ref()
    }

    pub fn on_text_changed(
        &mut self,
        field: F,
        chars: &[char],
        cursor: usize,
    ) -> Option<LookupRequest> {
        let Extraction {
            query,
            substitution_start,
            substitution_end,
        } = extract(chars, cursor)?;

        self.generation += 1;
        self.pending = Some(PendingSubstitution {
            generation: self.generation,
            field,
            start: substitution_start,
            end: substitution_end,
        });
        debug!(generation = self.generation, %query, "dispatching recipe link lookup");

        Some(LookupRequest {
            generation: self.generation,
            query,
        })
    }

    pub fn on_response(&mut self, generation: u64, lookup: LinkLookup) -> Resolution<F> {
        if !self.is_current(generation) {
            debug!(generation, current = self.generation, "dropping stale link lookup");
            return Resolution::Stale;
        }

        match lookup {
            LinkLookup::Single(candidate) => self.substitute(&candidate),
            LinkLookup::Candidates(mut candidates) if candidates.len() == 1 => {
                let candidate = candidates.remove(0);
                self.substitute(&candidate)
            }
            LinkLookup::Candidates(candidates) if candidates.is_empty() => Resolution::Nothing,
            LinkLookup::Candidates(candidates) => Resolution::Choose(candidates),
            LinkLookup::Markup(body) => Resolution::Markup(body),
        }
    }

    pub fn on_failure(&self, generation: u64, err: &ErrorInfo) {
        warn!(generation, error = %err, "recipe link lookup failed");
    }

    /// Completes the deferred substitution with the user's pick.
    pub fn choose(&mut self, candidate: &RecipeCandidate) -> Option<Substitution<F>> {
        let pending = self.pending.take()?;
        Some(Substitution {
            field: pending.field,
            start: pending.start,
            end: pending.end,
            link: markdown_link(&self.origin, candidate),
        })
    }

    fn substitute(&mut self, candidate: &RecipeCandidate) -> Resolution<F> {
        match self.choose(candidate) {
            Some(sub) => Resolution::Substitute(sub),
            None => Resolution::Nothing,
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| p.generation == generation)
    }
}
