//! Catalog persistence backends.

use std::path::{Path, PathBuf};

use super::{Catalog, CatalogError};

/// Durable mirror of the in-memory catalog.
pub trait CatalogBackend: Send {
    /// Read the persisted catalog. `Ok(None)` means nothing has been
    /// persisted yet.
    fn load(&self) -> Result<Option<Catalog>, CatalogError>;

    /// Replace the persisted catalog with `catalog`.
    fn save(&self, catalog: &Catalog) -> Result<(), CatalogError>;

    /// Human-readable location, for logs.
    fn location(&self) -> String;
}

/// Catalog stored as a pretty-printed JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn invalid(&self, reason: impl Into<String>) -> CatalogError {
        CatalogError::InvalidFormat {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }
}

impl CatalogBackend for JsonFileBackend {
    fn load(&self) -> Result<Option<Catalog>, CatalogError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CatalogError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        // Syntax first, then shape, so "not JSON" and "wrong JSON" are
        // reported differently.
        let value: serde_json::Value =
            serde_json::from_str(&contents).map_err(|source| CatalogError::Parse {
                path: self.path.clone(),
                source,
            })?;
        if !value.is_object() {
            return Err(self.invalid("expected an object of mood -> list of URLs"));
        }
        let catalog: Catalog =
            serde_json::from_value(value).map_err(|e| self.invalid(e.to_string()))?;
        catalog.check_invariants().map_err(|reason| self.invalid(reason))?;

        Ok(Some(catalog))
    }

    /// Atomic write: write to a temp file in the same directory, then rename.
    fn save(&self, catalog: &Catalog) -> Result<(), CatalogError> {
        let write_err = |source| CatalogError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir).map_err(write_err)?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "playlists.json".to_string());
        let tmp = dir.join(format!(".{}.{}.tmp", file_name, std::process::id()));

        let json = serde_json::to_string_pretty(catalog).map_err(|e| {
            write_err(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;
        std::fs::write(&tmp, json).map_err(write_err)?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(write_err(e));
        }
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
