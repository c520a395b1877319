//! Worker message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the event
//! thread and the catalog worker pool. Every request carries a [`Ticket`] that
//! the matching response echoes back, which is how the event thread tells a
//! current answer from one that has been superseded.

use crate::api::SearchQuery;
use crate::domain::{Entry, EntryId, Result};
use std::fmt;

/// Sequence number identifying one catalog request.
///
/// Tickets are strictly increasing within a [`TicketIssuer`], so a larger
/// ticket always belongs to a more recently issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(pub u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic ticket source shared by every component that issues requests.
#[derive(Debug, Default)]
pub struct TicketIssuer {
    last: u64,
}

impl TicketIssuer {
    /// Creates an issuer whose first ticket is `#1`.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// Returns the next ticket.
    pub fn issue(&mut self) -> Ticket {
        self.last += 1;
        Ticket(self.last)
    }
}

/// Macro to generate builder methods for `WorkerMessage` variants.
///
/// Each constructor takes the issuer first and stamps the message with a fresh
/// ticket.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with a fresh ticket")]
                pub fn $builder_name(tickets: &mut TicketIssuer, $($field: $ty),*) -> Self {
                    Self::$variant {
                        ticket: tickets.issue(),
                        $($field,)*
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    search(Search { query: SearchQuery }),
    recent(Recent { limit: usize }),
    categories(Categories {}),
    fetch(Fetch { id: EntryId }),
    delete(Delete { id: EntryId }),
}

/// Requests sent from the event thread to the worker pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Run a full-text search.
    Search {
        ticket: Ticket,
        /// Query text, category filter and result limit.
        query: SearchQuery,
    },

    /// Load the most recently updated entries.
    Recent {
        ticket: Ticket,
        /// Maximum number of entries.
        limit: usize,
    },

    /// Load the category names for the filter.
    Categories { ticket: Ticket },

    /// Fetch one entry with its full content.
    Fetch { ticket: Ticket, id: EntryId },

    /// Delete one entry.
    Delete { ticket: Ticket, id: EntryId },
}

impl WorkerMessage {
    /// Returns the ticket this request was issued with.
    #[must_use]
    pub const fn ticket(&self) -> Ticket {
        match self {
            Self::Search { ticket, .. }
            | Self::Recent { ticket, .. }
            | Self::Categories { ticket }
            | Self::Fetch { ticket, .. }
            | Self::Delete { ticket, .. } => *ticket,
        }
    }
}

/// Responses sent from the worker pool back to the event thread.
///
/// Each variant echoes the request ticket and carries the backend result
/// untouched; interpreting failures is the event thread's job.
#[derive(Debug)]
pub enum WorkerResponse {
    /// A search finished.
    SearchCompleted {
        ticket: Ticket,
        result: Result<Vec<Entry>>,
    },

    /// A recent-entries load finished.
    RecentLoaded {
        ticket: Ticket,
        result: Result<Vec<Entry>>,
    },

    /// The category list finished loading.
    CategoriesLoaded {
        ticket: Ticket,
        result: Result<Vec<String>>,
    },

    /// A single-entry fetch finished.
    EntryFetched {
        ticket: Ticket,
        id: EntryId,
        result: Result<Entry>,
    },

    /// A delete finished.
    EntryDeleted {
        ticket: Ticket,
        id: EntryId,
        result: Result<()>,
    },
}

impl WorkerResponse {
    /// Returns the ticket of the request this response answers.
    #[must_use]
    pub const fn ticket(&self) -> Ticket {
        match self {
            Self::SearchCompleted { ticket, .. }
            | Self::RecentLoaded { ticket, .. }
            | Self::CategoriesLoaded { ticket, .. }
            | Self::EntryFetched { ticket, .. }
            | Self::EntryDeleted { ticket, .. } => *ticket,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_stamp_increasing_tickets() {
        let mut tickets = TicketIssuer::new();
        let first = WorkerMessage::categories(&mut tickets);
        let second = WorkerMessage::delete(&mut tickets, EntryId(9));
        assert_eq!(first.ticket(), Ticket(1));
        assert_eq!(second.ticket(), Ticket(2));
        assert!(second.ticket() > first.ticket());
    }
}
