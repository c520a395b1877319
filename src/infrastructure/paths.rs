//! Standard locations for configuration and data files.
//!
//! Follows the platform conventions reported by the `dirs` crate, which
//! honours `XDG_CONFIG_HOME` and `XDG_DATA_HOME` on Linux. When no home
//! directory can be determined, paths fall back to the working directory.

use std::path::PathBuf;

/// Application directory name under the platform config/data roots.
const APP_DIR: &str = "sysref";

/// Name of the configuration file inside [`config_dir`].
pub const CONFIG_FILE: &str = "config.toml";

/// Returns the configuration directory, e.g. `~/.config/sysref`.
///
/// # Examples
///
/// ```
/// use sysref::infrastructure::config_dir;
///
/// assert!(config_dir().ends_with("sysref"));
/// ```
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join(APP_DIR)
}

/// Returns the default configuration file path, e.g. `~/.config/sysref/config.toml`.
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

/// Returns the data directory holding log files, e.g. `~/.local/share/sysref`.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from(".local").join("share"))
        .join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_lives_in_config_dir() {
        let file = config_file();
        assert_eq!(file.parent(), Some(config_dir().as_path()));
        assert!(file.ends_with("sysref/config.toml"));
    }

    #[test]
    fn data_dir_is_app_specific() {
        assert!(data_dir().ends_with(APP_DIR));
    }
}
