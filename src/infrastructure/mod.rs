//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where configuration is read from and where logs are written.

pub mod paths;

pub use paths::{config_dir, config_file, data_dir};
