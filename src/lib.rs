pub mod config;
pub mod conversation;
pub mod error;
pub mod models;
pub mod storage;

pub use config::{Config, StorageBackend};
pub use conversation::{BotState, Conversation, Lexicon, Outbox, Transcript};
pub use error::{ConfigError, DeckError, StorageError};
pub use models::{Card, CardKey, CardSelection, Deck};
