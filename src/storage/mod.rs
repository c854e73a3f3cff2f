//! Durable snapshots of the deck.
//!
//! A store always holds the full ordered card list; every save replaces the
//! previous snapshot as a whole.

pub mod json;
pub mod sqlite;

pub use json::JsonStore;
pub use sqlite::SqliteStore;

use crate::error::StorageError;
use crate::models::{Card, CardKey};
use std::collections::HashSet;

pub type Result<T> = std::result::Result<T, StorageError>;

pub trait DeckStore {
    /// Returns None when no snapshot has been written yet.
    fn load(&mut self) -> Result<Option<Vec<Card>>>;

    fn save(&mut self, cards: &[Card]) -> Result<()>;
}

/// Rejects a loaded snapshot that breaks the card invariants: normalized
/// keys, unique pairs, successes <= attempts, interval >= 1 and confidence
/// in [0, 1].
pub fn validate_snapshot(cards: &[Card]) -> Result<()> {
    let mut seen = HashSet::new();

    for card in cards {
        let key = CardKey::new(&card.english, &card.chinese);
        if key.english != card.english || key.chinese != card.chinese {
            return Err(corrupt(card, "keys are not normalized"));
        }
        if card.num_successes > card.num_attempts {
            return Err(corrupt(card, "more successes than attempts"));
        }
        if card.study_interval < 1 {
            return Err(corrupt(card, "study interval below 1"));
        }
        if !(0.0..=1.0).contains(&card.confidence_index) {
            return Err(corrupt(card, "confidence outside [0, 1]"));
        }
        if !seen.insert(key) {
            return Err(corrupt(card, "duplicate card"));
        }
    }
    Ok(())
}

fn corrupt(card: &Card, reason: &str) -> StorageError {
    StorageError::Corrupt(format!("{}: '{}', '{}'", reason, card.english, card.chinese))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_corrupt(card: Card) {
        let result = validate_snapshot(&[Card::new("dog", "狗"), card]);
        assert!(matches!(result, Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn test_valid_snapshot_passes() {
        let mut reviewed = Card::new("cat", "猫");
        reviewed.review_result(true);
        reviewed.review_result(false);

        assert!(validate_snapshot(&[]).is_ok());
        assert!(validate_snapshot(&[Card::new("dog", "狗"), reviewed]).is_ok());
    }

    #[test]
    fn test_unnormalized_keys_rejected() {
        let mut card = Card::new("cat", "猫");
        card.english = "Cat".to_string();
        assert_corrupt(card);

        let mut card = Card::new("cat", "猫");
        card.chinese = " 猫 ".to_string();
        assert_corrupt(card);
    }

    #[test]
    fn test_bad_statistics_rejected() {
        let mut card = Card::new("cat", "猫");
        card.study_interval = 0;
        assert_corrupt(card);

        let mut card = Card::new("cat", "猫");
        card.confidence_index = 7.5;
        assert_corrupt(card);

        let mut card = Card::new("cat", "猫");
        card.confidence_index = f64::NAN;
        assert_corrupt(card);

        let mut card = Card::new("cat", "猫");
        card.num_successes = 2;
        card.num_attempts = 1;
        assert_corrupt(card);
    }

    #[test]
    fn test_duplicate_pair_rejected() {
        assert_corrupt(Card::new("dog", "狗"));
    }
}
