//! Category keyword table used by the object counting tool.
//!
//! The built-in table covers animals, fruits and instruments. Deployments can
//! add categories or keywords with a JSON file (see `MCP_CATEGORIES_FILE`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "animals",
        &[
            "bear", "snake", "rabbit", "goat", "cat", "dog", "bird", "fish", "elephant", "lion",
        ],
    ),
    (
        "fruits",
        &[
            "apple",
            "banana",
            "orange",
            "grape",
            "strawberry",
            "blackberry",
            "nectarine",
            "plum",
        ],
    ),
    (
        "instruments",
        &[
            "clarinet", "trombone", "saxophone", "flute", "piano", "guitar", "violin",
        ],
    ),
];

/// Errors raised while loading an extra category file.
#[derive(Debug, Error)]
pub enum CategoryLoadError {
    #[error("failed to read category file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse category file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Mapping from lower-case category name to lower-case keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable {
    categories: BTreeMap<String, Vec<String>>,
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CategoryTable {
    /// The built-in table.
    pub fn builtin() -> Self {
        let categories = BUILTIN_CATEGORIES
            .iter()
            .map(|(name, words)| {
                (
                    name.to_string(),
                    words.iter().map(|w| w.to_string()).collect(),
                )
            })
            .collect();
        Self { categories }
    }

    /// Keywords for a category, looked up case-insensitively.
    pub fn keywords(&self, category: &str) -> Option<&[String]> {
        self.categories
            .get(&category.trim().to_lowercase())
            .map(Vec::as_slice)
    }

    /// Category names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Merge extra categories. Names and keywords are lower-cased; keywords
    /// already present are skipped.
    pub fn extend(&mut self, extra: BTreeMap<String, Vec<String>>) {
        for (name, words) in extra {
            let entry = self
                .categories
                .entry(name.trim().to_lowercase())
                .or_default();
            for word in words {
                let word = word.trim().to_lowercase();
                if !word.is_empty() && !entry.contains(&word) {
                    entry.push(word);
                }
            }
        }
    }

    /// Read a `{category: [keywords]}` JSON file.
    pub fn load_file(path: &Path) -> Result<BTreeMap<String, Vec<String>>, CategoryLoadError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CategoryLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| CategoryLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
