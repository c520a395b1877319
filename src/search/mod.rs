//! Search-and-view synchronization.
//!
//! This module decides what the user is looking at (recent entries or search
//! results), when to ask the catalog for more, and how to refresh after a
//! delete. It performs no I/O itself: requests come out as values and
//! responses go back in.
//!
//! # Components
//!
//! - [`debounce`]: Single-slot timer with an injectable clock
//! - [`controller`]: Owns the search state and issues searches
//! - [`loader`]: Loads and caches recent entries
//! - [`reconciler`]: Holds the visible results and refreshes them
//! - [`gateway`]: Delete and copy, with confirmation and notifications
//! - [`session`]: The components wired together for the event handler

pub mod controller;
pub mod debounce;
pub mod gateway;
pub mod loader;
pub mod reconciler;
pub mod session;

pub use controller::{SearchController, SearchState, SearchStep, ViewTarget};
pub use debounce::{Clock, Debouncer, ManualClock, SystemClock};
pub use gateway::{Clipboard, EntryActionGateway, Notification, NotificationKind, Prompt};
pub use loader::CatalogLoader;
pub use reconciler::{ViewContent, ViewReconciler};
pub use session::{Effect, SearchSession, SessionSettings};
