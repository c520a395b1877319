//! Domain layer for the SysRef client.
//!
//! Core types independent of the transport and the terminal: catalog entries
//! and the crate error type.
//!
//! # Organization
//!
//! - [`entry`]: Entry model, tag splitting, timestamp parsing, previews
//! - [`error`]: Error types and result aliases

pub mod entry;
pub mod error;

pub use entry::{Entry, EntryId};
pub use error::{FailureKind, Result, SysrefError};
