//! Platform-specific config and log locations.
//!
//!   Linux:   $XDG_CONFIG_HOME/playlist-service (default ~/.config)
//!   macOS:   ~/Library/Application Support/playlist-service
//!   Windows: %APPDATA%/playlist-service

use std::path::PathBuf;

const APP_DIR_NAME: &str = "playlist-service";

/// Get the service's config directory (cross-platform).
pub fn get_data_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Default location for rolling log files.
pub fn get_log_dir() -> PathBuf {
    get_data_dir().join("logs")
}
