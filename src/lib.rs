//! SysRef: a terminal client for a personal knowledge base of notes.
//!
//! The client talks to a SysRef server over HTTP and provides:
//! - Debounced full-text search with a category filter
//! - A list of recently updated entries when no search is active
//! - Entry actions: open in the browser, delete with confirmation, copy to clipboard
//! - Stale-response suppression so the screen always matches the latest request

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI + Terminal Runtime (main.rs, terminal.rs)      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Event handling
//! │  - Focus, selection, category cycling               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Search Session (search/)                           │  ← Sans-IO core
//! │  - Debouncer, controller, loader                    │
//! │  - View reconciler, entry action gateway            │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ API Layer     │   │ Worker Layer  │
//! │ (ui/)         │   │ (api/)        │   │ (worker/)     │
//! │ - Rendering   │   │ - Catalog     │   │ - Thread pool │
//! │ - Theming     │   │ - HTTP client │   │ - Tickets     │
//! │ - Overlays    │   │ - Wire models │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure, Domain, Observability              │
//! │  - Config/data paths, entry model, errors, logging  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`search`]: Debounced search, loading, reconciliation, and entry actions
//! - [`api`]: Catalog trait and its HTTP implementation
//! - [`worker`]: Background threads executing ticketed catalog requests
//! - [`domain`]: Core domain types (Entry, errors)
//! - [`ui`]: Terminal rendering with theme support
//! - [`terminal`]: Raw-mode runtime, key mapping, prompt, clipboard
//! - [`infrastructure`]: Platform paths
//! - [`observability`]: Rotating file logging
//!
//! # Configuration
//!
//! ```toml
//! # ~/.config/sysref/config.toml
//! base_url = "http://localhost:8000"
//! search_delay_ms = 300
//! search_limit = 20
//! recent_limit = 3
//! theme = "light"
//! log_level = "debug"
//! ```
//!
//! `SYSREF_URL`, `SYSREF_THEME`, `SYSREF_LOG` and `SYSREF_SEARCH_DELAY_MS`
//! override the file.
//!
//! # Examples
//!
//! ```rust
//! use sysref::search::{ManualClock, SearchSession, SessionSettings};
//! use std::sync::Arc;
//!
//! let mut session = SearchSession::new(Arc::new(ManualClock::new()), SessionSettings::default());
//! let requests = session.start();
//! assert_eq!(requests.len(), 2); // categories + recent entries
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod search;
pub mod terminal;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{Entry, EntryId, Result, SysrefError};
pub use ui::Theme;

use crate::search::{Clipboard, Prompt, SearchSession, SessionSettings, SystemClock};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Client configuration.
///
/// Loaded from `~/.config/sysref/config.toml` (see [`Config::load`]). Every
/// field has a default, so an empty or missing file is valid.
///
/// # Example
///
/// ```rust
/// use sysref::Config;
///
/// let config: Config = toml::from_str("base_url = \"http://notes.lan:8000\"").unwrap();
/// assert_eq!(config.base_url, "http://notes.lan:8000");
/// assert_eq!(config.search_delay_ms, 300);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root URL of the SysRef server. Default: `http://localhost:8000`
    pub base_url: String,

    /// Quiet period after the last keystroke before searching. Default: 300
    pub search_delay_ms: u64,

    /// Maximum search results per request. Default: 20
    pub search_limit: usize,

    /// Number of recent entries shown without a search. Default: 3
    pub recent_limit: usize,

    /// HTTP request timeout. Default: 10
    pub request_timeout_secs: u64,

    /// How long notifications stay visible. Default: 3000
    pub notification_ttl_ms: u64,

    /// Catalog worker threads. Default: 4
    pub workers: usize,

    /// Built-in theme name (`default`, `light`). Ignored if `theme_file` is set.
    pub theme: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Log filter directive: `trace`, `debug`, `info`, `warn`, `error`, or
    /// any `EnvFilter` expression. Default: `"info"`
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            search_delay_ms: 300,
            search_limit: 20,
            recent_limit: 3,
            request_timeout_secs: 10,
            notification_ttl_ms: 3000,
            workers: 4,
            theme: None,
            theme_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from `path` (or the default location), then
    /// applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`SysrefError::Config`] if the file exists but cannot be read
    /// or parsed. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let default_path = infrastructure::config_file();
        let path = path.unwrap_or(&default_path);
        let mut config = Self::from_file(path)?;
        config.apply_env();
        Ok(config)
    }

    /// Parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SysrefError::Config`] on read or parse failure other than
    /// the file not existing.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(SysrefError::Config(format!(
                    "Failed to read {}: {e}",
                    path.display()
                )))
            }
        };

        toml::from_str(&contents)
            .map_err(|e| SysrefError::Config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(&mut self) {
        let vars: HashMap<String, String> = std::env::vars()
            .filter(|(key, _)| key.starts_with("SYSREF_"))
            .collect();
        self.apply_env_map(&vars);
    }

    /// Applies overrides from a variable map.
    ///
    /// # Parsing Rules
    ///
    /// - `SYSREF_URL`: server root (ignored if blank)
    /// - `SYSREF_THEME`: built-in theme name
    /// - `SYSREF_LOG`: log filter directive
    /// - `SYSREF_SEARCH_DELAY_MS`: `u64`, keeps the current value on parse error
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use sysref::Config;
    ///
    /// let mut vars = HashMap::new();
    /// vars.insert("SYSREF_URL".to_string(), "http://10.0.0.2:8000".to_string());
    /// vars.insert("SYSREF_SEARCH_DELAY_MS".to_string(), "soon".to_string());
    ///
    /// let mut config = Config::default();
    /// config.apply_env_map(&vars);
    /// assert_eq!(config.base_url, "http://10.0.0.2:8000");
    /// assert_eq!(config.search_delay_ms, 300);
    /// ```
    pub fn apply_env_map(&mut self, vars: &HashMap<String, String>) {
        if let Some(url) = vars.get("SYSREF_URL").map(|s| s.trim()).filter(|s| !s.is_empty()) {
            self.base_url = url.to_string();
        }
        if let Some(theme) = vars.get("SYSREF_THEME") {
            self.theme = Some(theme.clone());
        }
        if let Some(level) = vars.get("SYSREF_LOG") {
            self.log_level.clone_from(level);
        }
        if let Some(raw) = vars.get("SYSREF_SEARCH_DELAY_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.search_delay_ms = ms,
                Err(e) => tracing::debug!(value = %raw, error = %e, "ignoring invalid SYSREF_SEARCH_DELAY_MS"),
            }
        }
    }

    /// Search session tunables derived from this configuration.
    #[must_use]
    pub const fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            debounce: Duration::from_millis(self.search_delay_ms),
            search_limit: self.search_limit,
            recent_limit: self.recent_limit,
        }
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub const fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    /// Resolves the theme: file first, then name, then the default.
    ///
    /// Failures are logged and fall back to the default theme.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        self.theme_file.as_ref().map_or_else(
            || {
                self.theme.as_ref().map_or_else(Theme::default, |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                        Theme::default()
                    })
                })
            },
            |theme_file| {
                Theme::from_file(theme_file).unwrap_or_else(|e| {
                    tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                    Theme::default()
                })
            },
        )
    }
}

/// Builds the interactive application state.
///
/// Creates a [`SearchSession`] on the system clock with the configured
/// tunables and the resolved theme. The session is not started; the runtime
/// sends [`Event::Started`] once the worker pool is up.
///
/// # Parameters
///
/// * `config` - Client configuration
/// * `prompt` - Delete confirmation capability
/// * `clipboard` - Clipboard capability
#[must_use]
pub fn initialize(config: &Config, prompt: Box<dyn Prompt>, clipboard: Box<dyn Clipboard>) -> AppState {
    tracing::debug!(base_url = %config.base_url, "initializing sysref client");

    let session = SearchSession::new(Arc::new(SystemClock), config.session_settings());
    AppState::new(session, config.load_theme(), &config.base_url, prompt, clipboard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_config_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = Config::from_file(&dir.path().join("absent.toml")).expect("defaults");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_config_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "search_delay_ms = 150\nrecent_limit = 5\ntheme = \"light\"").expect("write");

        let config = Config::from_file(file.path()).expect("valid config");
        assert_eq!(config.search_delay_ms, 150);
        assert_eq!(config.recent_limit, 5);
        assert_eq!(config.search_limit, 20);
        assert_eq!(config.load_theme().name, "light");
    }

    #[test]
    fn malformed_config_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "search_delay_ms = \"fast\"").expect("write");
        assert!(matches!(Config::from_file(file.path()), Err(SysrefError::Config(_))));
    }

    #[test]
    fn env_overrides_win() {
        let vars: HashMap<String, String> = [
            ("SYSREF_URL", "http://notes:9000"),
            ("SYSREF_THEME", "light"),
            ("SYSREF_LOG", "sysref=trace"),
            ("SYSREF_SEARCH_DELAY_MS", "50"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let mut config = Config::default();
        config.apply_env_map(&vars);

        assert_eq!(config.base_url, "http://notes:9000");
        assert_eq!(config.theme.as_deref(), Some("light"));
        assert_eq!(config.log_level, "sysref=trace");
        assert_eq!(config.session_settings().debounce, Duration::from_millis(50));
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme: Some("neon".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, "default");
    }
}
