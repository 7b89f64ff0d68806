//! Service configuration.
//!
//! Settings come from `<data_dir>/config.json`, or the file named by
//! `PLAYLIST_SERVICE_CONFIG`. Every field is optional and a missing file means
//! "all defaults".

pub mod paths;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use paths::get_data_dir;

/// Env var naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "PLAYLIST_SERVICE_CONFIG";

/// Env var enabling the rolling log file in the given directory.
pub const LOG_DIR_ENV: &str = "PLAYLIST_SERVICE_LOG_DIR";

pub const DEFAULT_BIND_ADDRESS: &str = "tcp://0.0.0.0:5556";
pub const DEFAULT_RECV_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_CATALOG_FILE: &str = "playlists.json";

/// config.json shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    /// ZeroMQ endpoint the reply socket binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// How long a single receive may block before the shutdown flag is checked.
    #[serde(default = "default_recv_timeout_ms")]
    pub recv_timeout_ms: u64,
    /// Persisted catalog; relative paths resolve against the working directory.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            recv_timeout_ms: default_recv_timeout_ms(),
            catalog_path: default_catalog_path(),
        }
    }
}

impl ServiceConfig {
    pub fn recv_timeout(&self) -> Duration {
        Duration::from_millis(self.recv_timeout_ms.max(1))
    }

    /// Bind address in the form the transport accepts.
    ///
    /// libzmq's `tcp://*:<port>` wildcard is rewritten to `0.0.0.0`.
    pub fn endpoint(&self) -> String {
        self.bind_address.replacen("tcp://*:", "tcp://0.0.0.0:", 1)
    }
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

fn default_recv_timeout_ms() -> u64 {
    DEFAULT_RECV_TIMEOUT_MS
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from(DEFAULT_CATALOG_FILE)
}

/// Read the service config, falling back to defaults.
pub fn read_service_config() -> ServiceConfig {
    let path = get_config_path();
    read_json_file(&path).unwrap_or_default()
}

/// Path to config.json (or the `PLAYLIST_SERVICE_CONFIG` override).
pub fn get_config_path() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| get_data_dir().join("config.json"))
}

/// Log directory requested through `PLAYLIST_SERVICE_LOG_DIR`, if any.
pub fn log_dir_from_env() -> Option<PathBuf> {
    std::env::var_os(LOG_DIR_ENV)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
}

/// Read a JSON file and deserialize it. Missing files are not worth a warning.
fn read_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Option<T> {
    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(val) => Some(val),
            Err(e) => {
                warn!("Failed to parse {}: {}", path.display(), e);
                None
            }
        },
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to read {}: {}", path.display(), e);
            }
            None
        }
    }
}
