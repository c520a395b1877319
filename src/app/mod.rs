//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the terminal runtime (`terminal.rs`) and the
//! search, worker, and UI layers. It implements the event-driven architecture
//! that powers the interactive client.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Keys / Ticks → Events → Event Handler → State Mutations → Actions → Side Effects
//!                              ↑                                        ↓
//!                              └────────── Worker Responses ────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input focus state
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, EntryAction, Event};
pub use modes::Focus;
pub use state::AppState;
