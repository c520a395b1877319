//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::Config;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the log file inside the data directory.
const LOG_FILE: &str = "sysref.log";

/// Initializes the tracing subscriber with file output.
///
/// Sets up a tracing subscriber pipeline that:
/// 1. Filters events based on the configured log level
/// 2. Formats them as plain text lines (no ANSI colors)
/// 3. Writes to a rotating file with backups
///
/// # Parameters
///
/// * `config` - Configuration carrying `log_level`
///
/// # Level Resolution
///
/// `config.log_level` already includes the `SYSREF_LOG` override when the
/// configuration was loaded through [`Config::load`]. An unparsable directive
/// falls back to `info`.
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently does nothing if that fails (logging is optional)
/// - Idempotent: only the first call takes effect
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::paths::data_dir();
    if let Err(_e) = std::fs::create_dir_all(&data_dir) {
        // Silently fail if we can't create the directory
        return;
    }

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let writer = Arc::new(FileWriter::new(data_dir.join(LOG_FILE)));

    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true)
        .with_writer(writer);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
