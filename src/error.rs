//! Error types shared by the deck and its storage backends.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),
}

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Failed to persist deck: {0}")]
    Storage(#[from] StorageError),

    /// Another conversation panicked while holding the deck lock.
    #[error("Deck lock poisoned")]
    LockPoisoned,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid lexicon: {0}")]
    InvalidLexicon(String),
}

pub type Result<T> = std::result::Result<T, DeckError>;
