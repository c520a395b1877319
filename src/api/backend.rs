//! Catalog backend abstraction.
//!
//! This module defines the [`Catalog`] trait that abstracts over the entry
//! store. The worker pool only talks to this trait, so the HTTP client can be
//! swapped for an in-memory double in tests.
//!
//! # Design Philosophy
//!
//! The trait is minimal and maps one method to one server endpoint used by the
//! client. It is not a generic REST client.

use crate::domain::{Entry, EntryId, Result};

/// Parameters of a full-text search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Trimmed, non-empty query text.
    pub text: String,

    /// Category filter; `None` means all categories.
    pub category: Option<String>,

    /// Maximum number of results.
    pub limit: usize,
}

impl SearchQuery {
    /// Builds a query from raw user input.
    ///
    /// The text is trimmed and a blank category means all categories.
    /// Returns `None` when nothing is left to search for.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sysref::api::SearchQuery;
    ///
    /// assert!(SearchQuery::new("   ", "", 20).is_none());
    /// let query = SearchQuery::new(" sqlite ", "Databases", 20).unwrap();
    /// assert_eq!(query.text, "sqlite");
    /// ```
    #[must_use]
    pub fn new(text: &str, category: &str, limit: usize) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let category = category.trim();
        Some(Self {
            text: text.to_string(),
            category: (!category.is_empty()).then(|| category.to_string()),
            limit,
        })
    }
}

/// Abstraction over the remote entry store.
///
/// Implementations must be shareable across worker threads.
///
/// # Implementations
///
/// - [`HttpCatalog`](crate::api::HttpCatalog): talks to a SysRef server
pub trait Catalog: Send + Sync {
    /// Runs a full-text search. Results are most relevant first; an empty
    /// list means no matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is malformed.
    fn search(&self, query: &SearchQuery) -> Result<Vec<Entry>>;

    /// Lists the most recently updated entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is malformed.
    fn recent(&self, limit: usize) -> Result<Vec<Entry>>;

    /// Lists category names in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is malformed.
    fn categories(&self) -> Result<Vec<String>>;

    /// Fetches one entry with its full content.
    ///
    /// # Errors
    ///
    /// Returns [`SysrefError::NotFound`](crate::domain::SysrefError::NotFound)
    /// for unknown ids, or a transport/parse error.
    fn fetch(&self, id: EntryId) -> Result<Entry>;

    /// Deletes an entry. Deleting an id that is already gone succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the delete or is unreachable.
    fn delete(&self, id: EntryId) -> Result<()>;
}
