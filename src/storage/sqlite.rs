//! SQLite snapshot of the deck
//!
//! Cards live in one table with a `position` column holding their order in the
//! deck. A save replaces every row inside a single transaction. The
//! `app_state` table records whether a snapshot was ever written, so an empty
//! deck is told apart from a fresh database.

use super::{DeckStore, Result};
use crate::models::Card;
use rusqlite::{Connection, params};
use std::path::Path;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database file and its tables
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS cards (
                position INTEGER PRIMARY KEY,
                english TEXT NOT NULL,
                chinese TEXT NOT NULL,
                num_attempts INTEGER NOT NULL DEFAULT 0,
                num_successes INTEGER NOT NULL DEFAULT 0,
                last_attempt TEXT,
                study_interval INTEGER NOT NULL DEFAULT 1,
                confidence_index REAL NOT NULL DEFAULT 0,
                UNIQUE(english, chinese)
            )",
            (),
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS app_state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            (),
        )?;

        Ok(Self { conn })
    }

    fn has_snapshot(&self) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM app_state WHERE key = 'snapshot_saved'",
            [],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

impl DeckStore for SqliteStore {
    fn load(&mut self) -> Result<Option<Vec<Card>>> {
        if !self.has_snapshot()? {
            return Ok(None);
        }

        let mut stmt = self.conn.prepare(
            "SELECT english, chinese, num_attempts, num_successes, last_attempt, study_interval, confidence_index
             FROM cards
             ORDER BY position ASC",
        )?;

        let cards = stmt
            .query_map([], |row| {
                Ok(Card {
                    english: row.get(0)?,
                    chinese: row.get(1)?,
                    num_attempts: row.get(2)?,
                    num_successes: row.get(3)?,
                    last_attempt: row.get(4)?,
                    study_interval: row.get(5)?,
                    confidence_index: row.get(6)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<Card>>>()?;

        log::info!("Loaded {} cards from SQLite", cards.len());
        Ok(Some(cards))
    }

    fn save(&mut self, cards: &[Card]) -> Result<()> {
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM cards", ())?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO cards (position, english, chinese, num_attempts, num_successes, last_attempt, study_interval, confidence_index)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for (position, card) in cards.iter().enumerate() {
                insert.execute(params![
                    position as i64,
                    card.english,
                    card.chinese,
                    card.num_attempts,
                    card.num_successes,
                    card.last_attempt,
                    card.study_interval,
                    card.confidence_index,
                ])?;
            }
        }
        tx.execute(
            "INSERT OR REPLACE INTO app_state (key, value) VALUES ('snapshot_saved', '1')",
            (),
        )?;

        tx.commit()?;
        log::debug!("Saved {} cards to SQLite", cards.len());
        Ok(())
    }
}
