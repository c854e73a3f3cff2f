//! JSON snapshot of the deck.
//! The whole card list is written to a temp file and renamed over the snapshot,
//! so a crash mid-write never leaves a truncated file behind.

use super::{DeckStore, Result};
use crate::models::Card;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl DeckStore for JsonStore {
    fn load(&mut self) -> Result<Option<Vec<Card>>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let cards: Vec<Card> = serde_json::from_str(&contents)?;

        log::info!("Loaded {} cards from '{}'", cards.len(), self.path.display());
        Ok(Some(cards))
    }

    fn save(&mut self, cards: &[Card]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json_string = serde_json::to_string_pretty(cards)?;
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json_string)?;
        fs::rename(&tmp_path, &self.path)?;

        log::debug!("Saved {} cards to '{}'", cards.len(), self.path.display());
        Ok(())
    }
}
