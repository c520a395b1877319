//! Catalog access layer.
//!
//! # Modules
//!
//! - [`backend`]: The [`Catalog`] trait the worker pool calls
//! - [`http`]: reqwest-based implementation for a SysRef server
//! - [`models`]: Wire records and their conversion into domain entries

pub mod backend;
pub mod http;
pub mod models;

pub use backend::{Catalog, SearchQuery};
pub use http::HttpCatalog;
pub use models::EntryRecord;
