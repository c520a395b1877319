//! Entry domain model.
//!
//! An [`Entry`] is one note or snippet in the catalog. The client treats it as
//! read-only data: it is fetched, displayed and passed back to the server by id,
//! never edited in place.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use std::fmt;

/// Number of content characters shown in a recent-entry preview.
pub const PREVIEW_CHARS: usize = 150;

/// Server-side identifier of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub i64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog entry as displayed by the client.
///
/// # Fields
///
/// - `id`: Server identifier, used for view/edit/delete/copy
/// - `title`, `category`, `content`: Free text as stored on the server
/// - `tags`: Ordered, trimmed, non-empty tags
/// - `updated_at`: Last modification time (UTC)
/// - `created_at`: Creation time when the server reports it
/// - `snippet`: Search excerpt with `<mark>` highlight markers, search results only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    pub category: String,
    pub tags: Vec<String>,
    pub content: String,
    pub updated_at: DateTime<Utc>,
    pub created_at: Option<DateTime<Utc>>,
    pub snippet: Option<String>,
}

impl Entry {
    /// Returns the content preview shown on recent-entry cards.
    ///
    /// The first [`PREVIEW_CHARS`] characters, followed by `...` when the
    /// content is longer.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sysref::domain::entry::{Entry, EntryId};
    /// # let mut entry = Entry {
    /// #     id: EntryId(1), title: String::new(), category: String::new(), tags: vec![],
    /// #     content: String::new(), updated_at: chrono::Utc::now(), created_at: None, snippet: None,
    /// # };
    /// entry.content = "x".repeat(200);
    /// assert_eq!(entry.preview().chars().count(), 153);
    /// ```
    #[must_use]
    pub fn preview(&self) -> String {
        let mut chars = self.content.chars();
        let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
        if chars.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }

    /// Formats `updated_at` in local time as `YYYY-MM-DD HH:MM`.
    #[must_use]
    pub fn updated_display(&self) -> String {
        self.updated_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    }
}

/// Splits a comma-separated tag string into trimmed, non-empty tags.
///
/// # Examples
///
/// ```
/// use sysref::domain::entry::split_tags;
///
/// assert_eq!(split_tags("linux, ssh,,  "), vec!["linux", "ssh"]);
/// assert!(split_tags("").is_empty());
/// ```
#[must_use]
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

/// Parses a server timestamp.
///
/// Accepts RFC 3339 and the SQLite `CURRENT_TIMESTAMP` layout
/// (`YYYY-MM-DD HH:MM:SS`, optionally with fractional seconds or a `T`
/// separator), which is UTC.
///
/// Returns `None` when no layout matches.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
        .map(|naive| naive.and_utc())
}
