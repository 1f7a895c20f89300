//! Saved-deck store.
//!
//! Decklists are kept in a single JSON object on disk, keyed by
//! `mtg_deck_<name>`. Every write replaces the file through a temp file in
//! the same directory, so an interrupted save never leaves a truncated
//! store behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::config;
use crate::error::{BoardStateError, Result};

/// Durable `deck name -> decklist text` mapping.
pub struct DeckStore {
    /// Directory holding the store file.
    pub dir: PathBuf,
    path: PathBuf,
}

impl DeckStore {
    /// Open (or create) a store.
    ///
    /// If `dir` is `None`, uses the platform-appropriate data directory.
    /// Creates the directory if it does not exist.
    pub fn new(dir: Option<PathBuf>) -> Result<Self> {
        let dir = dir.unwrap_or_else(config::default_storage_dir);
        fs::create_dir_all(&dir)?;
        let path = dir.join(config::STORE_FILE_NAME);
        Ok(Self { dir, path })
    }

    /// Path of the backing JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn key(name: &str) -> String {
        format!("{}{}", config::STORAGE_KEY_PREFIX, name)
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&contents)? {
            Value::Object(map) => Ok(map),
            _ => Err(BoardStateError::InvalidArgument(format!(
                "Deck store {} is not a JSON object",
                self.path.display()
            ))),
        }
    }

    fn write_all(&self, entries: &Map<String, Value>) -> Result<()> {
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer_pretty(&mut tmp, entries)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| BoardStateError::Io(e.error))?;
        Ok(())
    }

    /// Save a decklist and return the name it was stored under.
    ///
    /// When `name` is taken, ` 1`, ` 2`, ... is appended until a free name
    /// is found; existing decks are never overwritten.
    pub fn save(&self, name: &str, text: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BoardStateError::InvalidArgument(
                "Deck name must not be empty".into(),
            ));
        }

        let mut entries = self.read_all()?;
        let mut final_name = name.to_string();
        let mut counter = 1;
        while entries.contains_key(&Self::key(&final_name)) {
            final_name = format!("{} {}", name, counter);
            counter += 1;
        }

        entries.insert(Self::key(&final_name), Value::String(text.to_string()));
        self.write_all(&entries)?;
        log::info!("Saved deck \"{}\" to {}", final_name, self.path.display());
        Ok(final_name)
    }

    /// Load a saved decklist by name.
    pub fn load(&self, name: &str) -> Result<Option<String>> {
        let entries = self.read_all()?;
        Ok(entries
            .get(&Self::key(name))
            .and_then(|v| v.as_str())
            .map(str::to_string))
    }

    /// Delete a saved deck. Returns `false` if no such deck existed.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let mut entries = self.read_all()?;
        if entries.remove(&Self::key(name)).is_none() {
            return Ok(false);
        }
        self.write_all(&entries)?;
        Ok(true)
    }

    /// Saved deck names, sorted. Keys outside the deck prefix are ignored.
    pub fn names(&self) -> Result<Vec<String>> {
        let entries = self.read_all()?;
        let mut names: Vec<String> = entries
            .keys()
            .filter_map(|k| k.strip_prefix(config::STORAGE_KEY_PREFIX))
            .map(str::to_string)
            .collect();
        names.sort();
        Ok(names)
    }
}
