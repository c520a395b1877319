//! Background workers for catalog requests.
//!
//! This module runs all network I/O off the event thread. Requests and
//! responses are plain values passed over channels, each stamped with a
//! [`Ticket`] so the event thread can discard answers it no longer wants.
//!
//! # Architecture
//!
//! - `messages`: Ticketed request/response protocol types
//! - `handler`: Worker implementation and the thread pool

pub mod handler;
pub mod messages;

pub use handler::{CatalogWorker, WorkerPool};
pub use messages::{Ticket, TicketIssuer, WorkerMessage, WorkerResponse};
