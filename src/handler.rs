//! Turns one request line into one reply string.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::{AddOutcome, Catalog, CatalogStore};
use crate::command::Command;

/// Reply for unknown (or empty) moods. Names the four default moods even when
/// the loaded catalog has different ones.
pub const INVALID_MOOD: &str = "Invalid mood. Try: classical, upbeat, lofi, or ambient.";
pub const INVALID_URL: &str = "Invalid URL. Must begin with https://www.youtube.com";
pub const DUPLICATE_URL: &str = "URL already exists in playlist collection.";
pub const SAVE_FAILED: &str = "Could not save playlist. Please try again.";
pub const USAGE: &str = "Invalid request. Try one of:\n    classical\n    upbeat\n    lofi\n    ambient\n    add <mood> <https://www.youtube.com/...>";

pub struct RequestHandler<R = StdRng> {
    store: CatalogStore,
    rng: R,
}

impl RequestHandler<StdRng> {
    pub fn new(store: CatalogStore) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }
}

impl<R: Rng> RequestHandler<R> {
    pub fn with_rng(store: CatalogStore, rng: R) -> Self {
        Self { store, rng }
    }

    pub fn catalog(&self) -> &Catalog {
        self.store.catalog()
    }

    /// Parse and handle a raw request line.
    pub fn handle_line(&mut self, line: &str) -> String {
        self.handle(Command::parse(line))
    }

    pub fn handle(&mut self, command: Command) -> String {
        match command {
            Command::Lookup { category } => {
                let mood = category.to_lowercase();
                self.store
                    .get(&mood, &mut self.rng)
                    .unwrap_or(INVALID_MOOD)
                    .to_string()
            }
            Command::Add { category, url } => {
                let mood = category.to_lowercase();
                match self.store.add(&mood, &url) {
                    AddOutcome::Added => format!("Playlist added to {}.", mood),
                    AddOutcome::UnknownCategory => INVALID_MOOD.to_string(),
                    AddOutcome::InvalidUrl => INVALID_URL.to_string(),
                    AddOutcome::Duplicate => DUPLICATE_URL.to_string(),
                    AddOutcome::NotSaved => SAVE_FAILED.to_string(),
                }
            }
            Command::Malformed => USAGE.to_string(),
        }
    }
}
