//! Actions representing side effects to be executed by the runtime.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing user input or worker
//! responses. Actions bridge pure state transformations and effectful
//! operations like network requests, notifications, or launching a browser.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event, allowing
//! multiple side effects to be queued atomically. The terminal runtime executes
//! these actions in sequence.
//!
//! # Example
//!
//! ```rust
//! use sysref::app::Action;
//! use sysref::worker::{TicketIssuer, WorkerMessage};
//!
//! let mut tickets = TicketIssuer::new();
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::recent(&mut tickets, 3)),
//! ];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::search::{Effect, Notification};
use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Posts a request to the catalog worker pool.
    PostToWorker(WorkerMessage),

    /// Shows a transient notification.
    Notify(Notification),

    /// Opens a page of the SysRef web UI in the system browser.
    ///
    /// Used for the view and edit entry actions, which the terminal client
    /// does not implement itself.
    OpenUrl(String),

    /// Shows the keyboard shortcut overlay for a few seconds.
    ShowShortcuts,

    /// Leaves the interactive session.
    Quit,
}

impl From<Effect> for Action {
    fn from(effect: Effect) -> Self {
        match effect {
            Effect::Request(message) => Self::PostToWorker(message),
            Effect::Notify(notification) => Self::Notify(notification),
        }
    }
}
