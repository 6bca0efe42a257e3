use anyhow::{Context, Result};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const STORE_FILE: &str = "weather.json";

/// Parsed ASCII-art store: kind label -> field -> value.
///
/// Only the `picture` field is consulted today, but the store keeps whatever
/// other fields the file carries.
#[derive(Debug, Clone, Default)]
pub struct ArtStore {
    entries: HashMap<String, HashMap<String, String>>,
}

impl ArtStore {
    pub fn from_json(data: &str) -> Result<Self> {
        let entries = serde_json::from_str(data).context("malformed art store")?;
        Ok(Self { entries })
    }

    /// The picture for a kind label, if the store has an entry with one.
    pub fn picture(&self, label: &str) -> Option<&str> {
        self.entries.get(label)?.get("picture").map(String::as_str)
    }

    /// Try each candidate location in order and keep the first store that
    /// both reads and parses. Unreadable or malformed candidates are skipped,
    /// and `None` (every candidate failed) is a normal outcome the renderer
    /// degrades on, never an error.
    pub fn resolve(paths: &[PathBuf]) -> Option<Self> {
        for path in paths {
            let data = match fs::read_to_string(path) {
                Ok(data) => data,
                Err(err) => {
                    tracing::debug!(path = %path.display(), %err, "skipping art store candidate");
                    continue;
                }
            };
            match Self::from_json(&data) {
                Ok(store) => {
                    tracing::debug!(path = %path.display(), "loaded art store");
                    return Some(store);
                }
                Err(err) => {
                    tracing::debug!(path = %path.display(), %err, "skipping malformed art store");
                }
            }
        }
        None
    }
}

/// Candidate store locations, most specific first: an explicitly configured
/// directory, then `designs/` under the working directory (bare and
/// `./`-prefixed), then next to the executable, then one level above it
/// (covers `target/<profile>/` layouts).
pub fn candidate_paths(configured_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = configured_dir {
        paths.push(dir.join(STORE_FILE));
    }
    paths.push(Path::new("designs").join(STORE_FILE));
    paths.push(Path::new(".").join("designs").join(STORE_FILE));
    if let Ok(exe) = env::current_exe() {
        if let Some(dir) = exe.parent() {
            paths.push(dir.join("designs").join(STORE_FILE));
            paths.push(dir.join("..").join("designs").join(STORE_FILE));
        }
    }
    paths
}
