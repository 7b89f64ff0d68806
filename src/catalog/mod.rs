//! Mood catalog: category name → ordered, duplicate-free list of playlist URLs.
//!
//! Persisted as a plain JSON object:
//! ```json
//! {
//!   "ambient": ["https://www.youtube.com/watch?v=mPZkdNFkNps", "..."],
//!   "classical": ["..."]
//! }
//! ```

pub mod backend;
pub mod store;

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use backend::{CatalogBackend, JsonFileBackend};
pub use store::{AddOutcome, CatalogStore, REQUIRED_URL_PREFIX};

/// Seed playlists used when nothing valid has been persisted.
const DEFAULT_PLAYLISTS: &[(&str, &[&str])] = &[
    (
        "classical",
        &[
            "https://www.youtube.com/watch?v=n74kKqwWViU&list=RDQMMEp4Sg6L1VI&start_radio=1",
            "https://www.youtube.com/watch?v=_ioc6sdgugo&list=PL_qM1lclHDwXIxlaa1jDtslnFCEN846rm",
            "https://www.youtube.com/watch?v=VRYRgA8Zbuo&list=RDVRYRgA8Zbuo&start_radio=1",
            "https://www.youtube.com/watch?v=rvigx5N-wu4&list=RDrvigx5N-wu4&start_radio=1",
            "https://www.youtube.com/watch?v=895pPv4l_9Q&list=RD895pPv4l_9Q&start_radio=1",
        ],
    ),
    (
        "upbeat",
        &[
            "https://www.youtube.com/watch?v=OPf0YbXqDm0&list=RDQMXWO_c5BE-zc&start_radio=1",
            "https://www.youtube.com/watch?v=ljnGl5nvUJY&list=RDljnGl5nvUJY&start_radio=1",
            "https://www.youtube.com/watch?v=pIgZ7gMze7A&list=PLJNlve0_Ebae2aPbjfolLT-6LvZkP8UZA",
        ],
    ),
    (
        "lofi",
        &[
            "https://www.youtube.com/watch?v=XDpoBc8t6gE&list=RDQMwbpzXXO29_k&start_radio=1",
            "https://www.youtube.com/watch?v=sF80I-TQiW0",
            "https://www.youtube.com/watch?v=q0ff3e-A7DY",
        ],
    ),
    (
        "ambient",
        &[
            "https://www.youtube.com/watch?v=mPZkdNFkNps",
            "https://www.youtube.com/watch?v=8myYyMg1fFE",
            "https://www.youtube.com/watch?v=nMfPqeZjc2c",
        ],
    ),
];

/// Errors raised while reading or writing a persisted catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} has invalid format: {reason}", .path.display())]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// In-memory catalog.
///
/// Keys are kept sorted so that every save of the same catalog produces the
/// same file. URLs keep their insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    playlists: BTreeMap<String, Vec<String>>,
}

impl Default for Catalog {
    /// The built-in four-mood catalog.
    fn default() -> Self {
        DEFAULT_PLAYLISTS
            .iter()
            .map(|(mood, urls)| {
                (
                    mood.to_string(),
                    urls.iter().map(|u| u.to_string()).collect(),
                )
            })
            .collect()
    }
}

impl FromIterator<(String, Vec<String>)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self {
            playlists: iter.into_iter().collect(),
        }
    }
}

impl Catalog {
    /// Known category names, sorted.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.playlists.keys().map(String::as_str)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.playlists.contains_key(category)
    }

    /// Playlists for `category`, or `None` if the category is unknown.
    pub fn playlists(&self, category: &str) -> Option<&[String]> {
        self.playlists.get(category).map(Vec::as_slice)
    }

    /// Total number of playlist URLs across all categories.
    pub fn playlist_count(&self) -> usize {
        self.playlists.values().map(Vec::len).sum()
    }

    /// Append `url` to an existing category. Returns `false` if the category
    /// does not exist; duplicate checks are the caller's job.
    pub(crate) fn push(&mut self, category: &str, url: &str) -> bool {
        match self.playlists.get_mut(category) {
            Some(urls) => {
                urls.push(url.to_string());
                true
            }
            None => false,
        }
    }

    /// Remove the most recently appended URL of `category`.
    pub(crate) fn pop(&mut self, category: &str) -> Option<String> {
        self.playlists.get_mut(category).and_then(Vec::pop)
    }

    /// Check the invariants a decoded catalog must hold before it is trusted.
    ///
    /// Category names must be addressable by a single lower-case request
    /// token, and no URL may appear twice within one category.
    pub fn check_invariants(&self) -> Result<(), String> {
        for (category, urls) in &self.playlists {
            if category.is_empty() {
                return Err("empty category name".to_string());
            }
            if category.chars().any(char::is_whitespace) {
                return Err(format!("category {:?} contains whitespace", category));
            }
            if *category != category.to_lowercase() {
                return Err(format!("category {:?} is not lower-case", category));
            }

            let mut seen = HashSet::with_capacity(urls.len());
            if let Some(dup) = urls.iter().find(|url| !seen.insert(url.as_str())) {
                return Err(format!("duplicate URL {:?} in category {:?}", dup, category));
            }
        }
        Ok(())
    }
}
