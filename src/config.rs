//! Runtime settings for the bot: where the deck lives and which words it speaks.
use crate::conversation::{DEFAULT_LINES_PER_MESSAGE, Lexicon};
use crate::error::{ConfigError, StorageError};
use crate::storage::{DeckStore, JsonStore, SqliteStore};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum StorageBackend {
    #[default]
    Json,
    Sqlite,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub data_path: PathBuf,
    pub backend: StorageBackend,
    pub lexicon: Lexicon,
    pub lines_per_message: usize,
    /// Seed a missing snapshot with the default starter cards.
    pub starter_cards: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("cards.json"),
            backend: StorageBackend::Json,
            lexicon: Lexicon::english(),
            lines_per_message: DEFAULT_LINES_PER_MESSAGE,
            starter_cards: true,
        }
    }
}

impl Config {
    /// Replaces the lexicon with one read from a JSON file.
    pub fn load_lexicon(&mut self, path: impl Into<PathBuf>) -> Result<(), ConfigError> {
        self.lexicon = Lexicon::from_file(path.into())?;
        Ok(())
    }

    pub fn open_store(&self) -> Result<Box<dyn DeckStore + Send>, StorageError> {
        let store: Box<dyn DeckStore + Send> = match self.backend {
            StorageBackend::Json => Box::new(JsonStore::new(&self.data_path)),
            StorageBackend::Sqlite => Box::new(SqliteStore::open(&self.data_path)?),
        };
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DEFAULT_CARDS, Deck};
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.backend, StorageBackend::Json);
        assert_eq!(config.lines_per_message, 200);
        assert!(config.starter_cards);
    }

    #[test]
    fn test_open_store_for_each_backend() {
        let dir = TempDir::new().unwrap();

        for (backend, file) in [
            (StorageBackend::Json, "cards.json"),
            (StorageBackend::Sqlite, "cards.sqlite3"),
        ] {
            let config = Config {
                data_path: dir.path().join(file),
                backend,
                ..Config::default()
            };

            let deck = Deck::open(config.open_store().unwrap(), config.starter_cards).unwrap();
            assert_eq!(deck.len(), DEFAULT_CARDS.len());
            assert!(config.data_path.exists());
        }
    }

    #[test]
    fn test_load_missing_lexicon_fails() {
        let mut config = Config::default();
        let result = config.load_lexicon("no_such_lexicon_xyz.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
        assert_eq!(config.lexicon, Lexicon::english());
    }
}
