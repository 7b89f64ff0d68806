//! Owned catalog plus its persistence backend.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};

use super::{Catalog, CatalogBackend, CatalogError};

/// Every accepted playlist URL must start with this.
pub const REQUIRED_URL_PREFIX: &str = "https://www.youtube.com";

/// Result of [`CatalogStore::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    UnknownCategory,
    InvalidUrl,
    Duplicate,
    /// Validation passed but the catalog could not be persisted; the append
    /// was rolled back.
    NotSaved,
}

pub struct CatalogStore {
    catalog: Catalog,
    backend: Box<dyn CatalogBackend>,
}

impl CatalogStore {
    /// A store holding the built-in catalog. Call [`load`](Self::load) to
    /// pick up persisted state.
    pub fn new(backend: Box<dyn CatalogBackend>) -> Self {
        Self::with_catalog(Catalog::default(), backend)
    }

    pub fn with_catalog(catalog: Catalog, backend: Box<dyn CatalogBackend>) -> Self {
        Self { catalog, backend }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Replace the in-memory catalog with the persisted one, if there is a
    /// usable one. Problems are logged and the current catalog is kept.
    pub fn load(&mut self) {
        let location = self.backend.location();
        match self.backend.load() {
            Ok(Some(catalog)) => {
                info!(
                    source = %location,
                    categories = catalog.categories().count(),
                    playlists = catalog.playlist_count(),
                    "Loaded playlist catalog"
                );
                self.catalog = catalog;
            }
            Ok(None) => {
                info!(source = %location, "No saved playlists, using defaults");
            }
            Err(e @ CatalogError::InvalidFormat { .. }) => {
                warn!("{}. Using default playlists.", e);
            }
            Err(e) => {
                warn!(error = %e, "Could not read saved playlists. Using default playlists.");
            }
        }
    }

    /// Write the whole catalog through the backend.
    pub fn save(&self) -> Result<(), CatalogError> {
        self.backend.save(&self.catalog)
    }

    /// Uniformly random playlist for `category`.
    ///
    /// `None` if the category is unknown or has no playlists.
    pub fn get<R: Rng + ?Sized>(&self, category: &str, rng: &mut R) -> Option<&str> {
        self.catalog
            .playlists(category)?
            .choose(rng)
            .map(String::as_str)
    }

    /// Validate and append `url` to `category`, persisting before reporting
    /// success.
    pub fn add(&mut self, category: &str, url: &str) -> AddOutcome {
        let Some(existing) = self.catalog.playlists(category) else {
            return AddOutcome::UnknownCategory;
        };
        if !is_valid_url(url) {
            return AddOutcome::InvalidUrl;
        }
        if existing.iter().any(|u| u == url) {
            return AddOutcome::Duplicate;
        }

        self.catalog.push(category, url);
        if let Err(e) = self.save() {
            warn!(error = %e, category, "Failed to save playlist, rolling back");
            self.catalog.pop(category);
            return AddOutcome::NotSaved;
        }

        info!(category, url, "Playlist added");
        AddOutcome::Added
    }
}

fn is_valid_url(url: &str) -> bool {
    !url.is_empty() && url.starts_with(REQUIRED_URL_PREFIX)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::catalog::JsonFileBackend;

    /// Backend that keeps the last saved catalog in memory.
    #[derive(Clone, Default)]
    pub(crate) struct MemoryBackend {
        pub saved: Arc<Mutex<Option<Catalog>>>,
        pub fail_saves: bool,
    }

    impl CatalogBackend for MemoryBackend {
        fn load(&self) -> Result<Option<Catalog>, CatalogError> {
            Ok(self.saved.lock().unwrap().clone())
        }

        fn save(&self, catalog: &Catalog) -> Result<(), CatalogError> {
            if self.fail_saves {
                return Err(CatalogError::Write {
                    path: "memory".into(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                });
            }
            *self.saved.lock().unwrap() = Some(catalog.clone());
            Ok(())
        }

        fn location(&self) -> String {
            "memory".to_string()
        }
    }

    fn memory_store() -> (CatalogStore, MemoryBackend) {
        let backend = MemoryBackend::default();
        (CatalogStore::new(Box::new(backend.clone())), backend)
    }

    const NEW_URL: &str = "https://www.youtube.com/watch?v=jfKfPfyJRdk";

    #[test]
    fn test_get_returns_member_of_category() {
        let (store, _) = memory_store();
        let mut rng = StdRng::seed_from_u64(7);
        let classical = store.catalog().playlists("classical").unwrap().to_vec();
        for _ in 0..50 {
            let url = store.get("classical", &mut rng).unwrap();
            assert!(classical.iter().any(|u| u == url));
        }
    }

    #[test]
    fn test_get_unknown_or_empty_category() {
        let catalog: Catalog = vec![("focus".to_string(), vec![])].into_iter().collect();
        let store = CatalogStore::with_catalog(catalog, Box::new(MemoryBackend::default()));
        let mut rng = StdRng::seed_from_u64(1);
        assert!(store.get("focus", &mut rng).is_none());
        assert!(store.get("classical", &mut rng).is_none());
    }

    #[test]
    fn test_add_success_appends_and_saves() {
        let (mut store, backend) = memory_store();
        let before = store.catalog().playlists("lofi").unwrap().len();

        assert_eq!(store.add("lofi", NEW_URL), AddOutcome::Added);

        let lofi = store.catalog().playlists("lofi").unwrap();
        assert_eq!(lofi.len(), before + 1);
        assert_eq!(lofi.last().map(String::as_str), Some(NEW_URL));
        assert_eq!(backend.saved.lock().unwrap().as_ref(), Some(store.catalog()));
    }

    #[test]
    fn test_add_rejections_leave_catalog_unchanged() {
        let (mut store, backend) = memory_store();
        let original = store.catalog().clone();

        assert_eq!(store.add("focus", NEW_URL), AddOutcome::UnknownCategory);
        assert_eq!(store.add("lofi", "not-a-youtube-url"), AddOutcome::InvalidUrl);
        assert_eq!(store.add("lofi", ""), AddOutcome::InvalidUrl);
        assert_eq!(
            store.add("lofi", "http://www.youtube.com/watch?v=x"),
            AddOutcome::InvalidUrl
        );
        assert_eq!(
            store.add("ambient", "https://www.youtube.com/watch?v=nMfPqeZjc2c"),
            AddOutcome::Duplicate
        );

        assert_eq!(store.catalog(), &original);
        assert!(backend.saved.lock().unwrap().is_none());
    }

    #[test]
    fn test_unknown_category_checked_before_url() {
        let (mut store, _) = memory_store();
        assert_eq!(store.add("focus", "garbage"), AddOutcome::UnknownCategory);
    }

    #[test]
    fn test_repeated_add_is_duplicate() {
        let (mut store, _) = memory_store();
        let before = store.catalog().playlists("upbeat").unwrap().len();
        assert_eq!(store.add("upbeat", NEW_URL), AddOutcome::Added);
        assert_eq!(store.add("upbeat", NEW_URL), AddOutcome::Duplicate);
        assert_eq!(store.catalog().playlists("upbeat").unwrap().len(), before + 1);
    }

    #[test]
    fn test_same_url_allowed_in_other_category() {
        let (mut store, _) = memory_store();
        assert_eq!(
            store.add("lofi", "https://www.youtube.com/watch?v=nMfPqeZjc2c"),
            AddOutcome::Added
        );
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let backend = MemoryBackend {
            fail_saves: true,
            ..Default::default()
        };
        let mut store = CatalogStore::new(Box::new(backend));
        let original = store.catalog().clone();

        assert_eq!(store.add("lofi", NEW_URL), AddOutcome::NotSaved);
        assert_eq!(store.catalog(), &original);
    }

    #[test]
    fn test_load_replaces_defaults_when_valid() {
        let backend = MemoryBackend::default();
        let saved: Catalog = vec![(
            "focus".to_string(),
            vec!["https://www.youtube.com/watch?v=f".to_string()],
        )]
        .into_iter()
        .collect();
        *backend.saved.lock().unwrap() = Some(saved.clone());

        let mut store = CatalogStore::new(Box::new(backend));
        store.load();
        assert_eq!(store.catalog(), &saved);
    }

    #[test]
    fn test_load_keeps_defaults_on_missing_or_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("playlists.json");

        let mut store = CatalogStore::new(Box::new(JsonFileBackend::new(&path)));
        store.load();
        assert_eq!(store.catalog(), &Catalog::default());

        std::fs::write(&path, r#"["not", "a", "mapping"]"#).unwrap();
        store.load();
        assert_eq!(store.catalog(), &Catalog::default());

        std::fs::write(&path, "definitely not json").unwrap();
        store.load();
        assert_eq!(store.catalog(), &Catalog::default());
    }

    #[test]
    fn test_added_playlist_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("playlists.json");

        let mut first = CatalogStore::new(Box::new(JsonFileBackend::new(&path)));
        first.load();
        assert_eq!(first.add("classical", NEW_URL), AddOutcome::Added);

        let mut second = CatalogStore::new(Box::new(JsonFileBackend::new(&path)));
        second.load();
        assert_eq!(second.catalog(), first.catalog());
        assert!(second
            .catalog()
            .playlists("classical")
            .unwrap()
            .iter()
            .any(|u| u == NEW_URL));
    }
}
