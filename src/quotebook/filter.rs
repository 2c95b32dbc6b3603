//! # Filter Engine
//!
//! Listing views narrow the full collection with a free-text search term and a
//! category selector. Both predicates must hold:
//!
//! - **Category**: the selector is [`ALL_CATEGORY`] or equals the quote's
//!   category exactly (case-sensitive).
//! - **Search**: the term is empty, or it occurs case-insensitively in the
//!   content, author, source, or any tag.
//!
//! The term is used verbatim: a whitespace-only term is a literal substring.
//! Results keep the input order; there is no relevance ranking.

use crate::model::{Quote, ALL_CATEGORY};

/// Maximum number of related quotes shown on a detail view.
pub const RELATED_LIMIT: usize = 4;

/// The `(search, category)` pair held by a listing view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteFilter {
    pub search: String,
    pub category: String,
}

impl Default for QuoteFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl QuoteFilter {
    /// The cleared state: no search term, every category.
    pub fn all() -> Self {
        Self {
            search: String::new(),
            category: ALL_CATEGORY.to_string(),
        }
    }

    pub fn new(search: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            category: category.into(),
        }
    }

    /// True when either predicate narrows the listing.
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.category != ALL_CATEGORY
    }

    pub fn apply(&self, quotes: &[Quote]) -> Vec<Quote> {
        filter_quotes(quotes, &self.search, &self.category)
    }
}

pub fn filter_quotes(quotes: &[Quote], search_term: &str, category: &str) -> Vec<Quote> {
    let term_lower = search_term.to_lowercase();
    quotes
        .iter()
        .filter(|q| matches_category(q, category) && matches_search(q, &term_lower))
        .cloned()
        .collect()
}

fn matches_category(quote: &Quote, category: &str) -> bool {
    category == ALL_CATEGORY || quote.category == category
}

/// `term_lower` must already be lower-cased.
fn matches_search(quote: &Quote, term_lower: &str) -> bool {
    if term_lower.is_empty() {
        return true;
    }
    let contains = |field: &str| field.to_lowercase().contains(term_lower);
    contains(&quote.content)
        || contains(&quote.author)
        || contains(&quote.source)
        || quote.tags.iter().any(|t| contains(t))
}

/// Quotes sharing the current quote's category or at least one of its tags,
/// in collection order, excluding the quote itself, at most [`RELATED_LIMIT`].
pub fn related_quotes(current: &Quote, all: &[Quote]) -> Vec<Quote> {
    all.iter()
        .filter(|q| q.id != current.id)
        .filter(|q| q.category == current.category || q.tags.iter().any(|t| current.has_tag(t)))
        .take(RELATED_LIMIT)
        .cloned()
        .collect()
}
