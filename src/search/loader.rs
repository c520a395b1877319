//! Recent-entries loader.

use crate::domain::{Entry, Result};
use crate::worker::{Ticket, TicketIssuer, WorkerMessage};

/// Number of recent entries shown when no search is active.
pub const DEFAULT_RECENT_LIMIT: usize = 3;

/// Issues recent-entry loads and keeps the last good list.
///
/// The cached list lets clearing a search show recent entries again without
/// another round trip.
#[derive(Debug)]
pub struct CatalogLoader {
    limit: usize,
    latest: Option<Ticket>,
    cached: Option<Vec<Entry>>,
}

impl CatalogLoader {
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self {
            limit,
            latest: None,
            cached: None,
        }
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Builds a load request and remembers its ticket as the one to trust.
    pub fn load_recent(&mut self, tickets: &mut TicketIssuer) -> WorkerMessage {
        let message = WorkerMessage::recent(tickets, self.limit);
        self.latest = Some(message.ticket());
        tracing::debug!(limit = self.limit, ticket = %message.ticket(), "recent entries requested");
        message
    }

    /// Takes a load response.
    ///
    /// Returns `None` for a response that a later load has superseded. A
    /// successful current response also replaces the cache.
    pub fn accept(&mut self, ticket: Ticket, result: Result<Vec<Entry>>) -> Option<Result<Vec<Entry>>> {
        if self.latest != Some(ticket) {
            tracing::debug!(%ticket, "stale recent entries dropped");
            return None;
        }
        self.latest = None;
        if let Ok(entries) = &result {
            self.cached = Some(entries.clone());
        }
        Some(result)
    }

    /// Whether a load is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.latest.is_some()
    }

    /// The last successfully loaded list.
    #[must_use]
    pub fn cached(&self) -> Option<&[Entry]> {
        self.cached.as_deref()
    }

    /// Forgets the cached list and any outstanding load.
    ///
    /// Called after the catalog changes, so the next recent view is fetched
    /// fresh and a load issued before the change can no longer land.
    pub fn invalidate(&mut self) {
        let had_cache = self.cached.take().is_some();
        let had_load = self.latest.take().is_some();
        tracing::debug!(had_cache, had_load, "recent entries cache invalidated");
    }
}
