//! Entry actions: delete and copy.
//!
//! The gateway gates deletes behind a confirmation prompt, issues the catalog
//! requests, and turns their outcomes into notifications. It never touches the
//! search state; whether a finished delete needs a view refresh is reported
//! back to the caller.

use crate::domain::{Entry, EntryId, Result};
use crate::worker::{Ticket, TicketIssuer, WorkerMessage};
use std::collections::HashMap;

/// Question asked before every delete.
pub const DELETE_QUESTION: &str = "Are you sure you want to delete this entry?";

/// Synchronous yes/no gate.
pub trait Prompt {
    /// Asks `question`; `true` means go ahead.
    fn confirm(&mut self, question: &str) -> bool;
}

/// Write access to the system clipboard.
pub trait Clipboard {
    /// Replaces the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns [`SysrefError::Permission`](crate::domain::SysrefError::Permission)
    /// when the clipboard cannot be written.
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// A transient message for the notification area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Info,
        }
    }
}

/// Outcome of a finished delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub id: EntryId,
    pub notification: Notification,
    /// `true` only on success; a failed delete changed nothing.
    pub reconcile: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingOp {
    Delete(EntryId),
    Copy(EntryId),
}

/// Dispatcher for per-entry actions, keyed by entry id.
#[derive(Debug, Default)]
pub struct EntryActionGateway {
    pending: HashMap<Ticket, PendingOp>,
}

impl EntryActionGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks for confirmation, then builds the delete request.
    ///
    /// Returns `None` when the user declines; nothing is sent in that case.
    pub fn delete_entry(
        &mut self,
        id: EntryId,
        prompt: &mut dyn Prompt,
        tickets: &mut TicketIssuer,
    ) -> Option<WorkerMessage> {
        if !prompt.confirm(DELETE_QUESTION) {
            tracing::debug!(%id, "delete declined");
            return None;
        }
        let message = WorkerMessage::delete(tickets, id);
        self.pending.insert(message.ticket(), PendingOp::Delete(id));
        tracing::info!(%id, ticket = %message.ticket(), "delete requested");
        Some(message)
    }

    /// Builds the fetch request whose answer will be copied.
    pub fn copy_entry(&mut self, id: EntryId, tickets: &mut TicketIssuer) -> WorkerMessage {
        let message = WorkerMessage::fetch(tickets, id);
        self.pending.insert(message.ticket(), PendingOp::Copy(id));
        tracing::debug!(%id, ticket = %message.ticket(), "copy requested");
        message
    }

    /// Whether any delete or copy is still in flight.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Takes a delete response. `None` if the ticket is not a pending delete.
    pub fn on_deleted(&mut self, ticket: Ticket, result: Result<()>) -> Option<DeleteOutcome> {
        let Some(PendingOp::Delete(id)) = self.pending.remove(&ticket) else {
            return None;
        };
        Some(match result {
            Ok(()) => {
                tracing::info!(%id, "entry deleted");
                DeleteOutcome {
                    id,
                    notification: Notification::success("Entry deleted successfully"),
                    reconcile: true,
                }
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "delete failed");
                DeleteOutcome {
                    id,
                    notification: Notification::error("Error deleting entry"),
                    reconcile: false,
                }
            }
        })
    }

    /// Takes a fetch response and writes the entry content to the clipboard.
    ///
    /// `None` if the ticket is not a pending copy.
    pub fn on_fetched(
        &mut self,
        ticket: Ticket,
        result: Result<Entry>,
        clipboard: &mut dyn Clipboard,
    ) -> Option<Notification> {
        let Some(PendingOp::Copy(id)) = self.pending.remove(&ticket) else {
            return None;
        };
        let copied = result.and_then(|entry| clipboard.write_text(&entry.content));
        Some(match copied {
            Ok(()) => {
                tracing::debug!(%id, "entry copied");
                Notification::success("Content copied to clipboard")
            }
            Err(e) => {
                tracing::warn!(%id, kind = ?e.kind(), error = %e, "copy failed");
                Notification::error("Error copying to clipboard")
            }
        })
    }
}
