//! Wire record models for the catalog HTTP API.
//!
//! These types mirror the JSON bodies the SysRef server returns. They are kept
//! separate from the domain [`Entry`] so that server quirks (tags as one
//! comma-separated string, SQLite timestamp layout) stay at the boundary.

use crate::domain::entry::{parse_timestamp, split_tags};
use crate::domain::{Entry, EntryId, SysrefError};
use serde::{Deserialize, Serialize};

/// An entry as serialized by the server.
///
/// Search responses add `snippet`; list and fetch responses omit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    /// Server identifier.
    pub id: i64,

    pub title: String,

    /// Full markdown body.
    pub content: String,

    pub category: String,

    /// Comma-separated tags, possibly empty.
    #[serde(default)]
    pub tags: String,

    #[serde(default)]
    pub created_at: Option<String>,

    pub updated_at: Option<String>,

    /// FTS excerpt with `<mark>` markers (search only).
    #[serde(default)]
    pub snippet: Option<String>,
}

impl TryFrom<EntryRecord> for Entry {
    type Error = SysrefError;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        let updated_raw = record
            .updated_at
            .ok_or_else(|| SysrefError::Parse(format!("entry {} has no updated_at", record.id)))?;
        let updated_at = parse_timestamp(&updated_raw).ok_or_else(|| {
            SysrefError::Parse(format!("entry {} has unreadable updated_at {updated_raw:?}", record.id))
        })?;

        Ok(Self {
            id: EntryId(record.id),
            title: record.title,
            category: record.category,
            tags: split_tags(&record.tags),
            content: record.content,
            updated_at,
            created_at: record.created_at.as_deref().and_then(parse_timestamp),
            snippet: record.snippet.filter(|s| !s.is_empty()),
        })
    }
}

/// Converts a list of wire records, failing on the first malformed record.
///
/// # Errors
///
/// Returns [`SysrefError::Parse`] if any record lacks a readable `updated_at`.
pub fn into_entries(records: Vec<EntryRecord>) -> Result<Vec<Entry>, SysrefError> {
    records.into_iter().map(Entry::try_from).collect()
}
