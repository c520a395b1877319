//! Structured logging to a rotating file.
//!
//! The terminal front end owns stdout and stderr while it runs, so every
//! `tracing` event goes to a log file in the data directory instead.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter → sysref.log
//! ```
//!
//! # Features
//!
//! - **File-Based Output**: `$XDG_DATA_HOME/sysref/sysref.log` (or `~/.local/share/sysref/sysref.log`)
//! - **Automatic Rotation**: Files rotate at 10MB with 3-backup retention
//!
//! # Configuration
//!
//! Log level is controlled via:
//! 1. `SYSREF_LOG` environment variable (highest priority)
//! 2. `log_level` in the configuration file
//! 3. Default: `"info"`
//!
//! # Usage
//!
//! ```rust,no_run
//! use sysref::observability::init_tracing;
//! use sysref::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("client initialized");
//! ```

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::init_tracing;
