//! Deck owns every card, keeps them sorted by ascending confidence and writes
//! a snapshot through its store after each mutation.

use super::{Card, CardKey, CardSelection, normalize_chinese, normalize_english};
use crate::error::Result;
use crate::storage::{DeckStore, validate_snapshot};
use rand::Rng;

/// Cards a brand new deck starts with. Mostly the bot's own commands.
pub const DEFAULT_CARDS: [(&str, &str); 9] = [
    ("add", "添加"),
    ("remove", "消除"),
    ("website", "網址"),
    ("help", "幫助"),
    ("practice", "實踐"),
    ("summary", "概括"),
    ("list", "列表"),
    ("english language", "英文"),
    ("chinese language", "中文"),
];

pub const EMPTY_DECK_MESSAGE: &str = "There are no cards in the deck. Use 'add' to add some!";

pub struct Deck {
    cards: Vec<Card>,
    num_attempts: u32,
    num_successes: u32,
    store: Box<dyn DeckStore + Send>,
}

impl Deck {
    /// Loads the deck from its store. A snapshot that breaks the card
    /// invariants is rejected with `StorageError::Corrupt`.
    ///
    /// A missing snapshot is not an error: the deck starts with `DEFAULT_CARDS`
    /// (or empty when `with_starter_cards` is false) and is persisted right away.
    pub fn open(mut store: Box<dyn DeckStore + Send>, with_starter_cards: bool) -> Result<Self> {
        let loaded = store.load()?;
        if let Some(cards) = &loaded {
            validate_snapshot(cards)?;
        }
        let fresh = loaded.is_none();

        let cards = loaded.unwrap_or_else(|| {
            log::warn!("No cards snapshot found. Creating a new deck.");
            if with_starter_cards {
                DEFAULT_CARDS
                    .iter()
                    .map(|(english, chinese)| Card::new(english, chinese))
                    .collect()
            } else {
                Vec::new()
            }
        });

        let mut deck = Self {
            cards,
            num_attempts: 0,
            num_successes: 0,
            store,
        };
        deck.refresh();

        if fresh {
            deck.store.save(&deck.cards)?;
        }

        log::info!("Deck ready with {} cards", deck.cards.len());
        Ok(deck)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn num_attempts(&self) -> u32 {
        self.num_attempts
    }

    pub fn num_successes(&self) -> u32 {
        self.num_successes
    }

    pub fn find(&self, key: &CardKey) -> Option<&Card> {
        self.cards.iter().find(|card| card.matches(key))
    }

    /// Recomputes the aggregates and re-sorts by ascending confidence.
    /// The sort is stable, so ties keep their relative order.
    pub fn refresh(&mut self) {
        self.num_attempts = self.cards.iter().map(|card| card.num_attempts).sum();
        self.num_successes = self.cards.iter().map(|card| card.num_successes).sum();
        self.cards
            .sort_by(|a, b| a.confidence_index.total_cmp(&b.confidence_index));
    }

    /// Refreshes and persists. If the write fails the cards are restored to
    /// `previous` so memory never runs ahead of the snapshot.
    fn commit(&mut self, previous: Vec<Card>) -> Result<()> {
        self.refresh();

        if let Err(err) = self.store.save(&self.cards) {
            log::error!("Failed to save deck, rolling back: {}", err);
            self.cards = previous;
            self.refresh();
            return Err(err.into());
        }
        Ok(())
    }

    /// Adds a card. Returns false if a card with the same normalized pair exists.
    pub fn add_card(&mut self, english: &str, chinese: &str) -> Result<bool> {
        let key = CardKey::new(english, chinese);
        if self.find(&key).is_some() {
            log::warn!("Ignoring duplicate card: {}, {}", key.english, key.chinese);
            return Ok(false);
        }

        let previous = self.cards.clone();
        self.cards.push(Card::new(&key.english, &key.chinese));
        self.commit(previous)?;

        log::info!("Card added: {}, {}", key.english, key.chinese);
        Ok(true)
    }

    /// Removes the first card whose english or chinese field equals `key`.
    pub fn remove_card(&mut self, key: &str) -> Result<bool> {
        let english = normalize_english(key);
        let chinese = normalize_chinese(key);

        let Some(index) = self
            .cards
            .iter()
            .position(|card| card.english == english || card.chinese == chinese)
        else {
            log::warn!("Card '{}' was not found, no removal performed", key.trim());
            return Ok(false);
        };

        let previous = self.cards.clone();
        let removed = self.cards.remove(index);
        self.commit(previous)?;

        log::info!("Card removed: {}, {}", removed.english, removed.chinese);
        Ok(true)
    }

    /// Records a review outcome on the card identified by `key`.
    /// Returns false if that card is no longer in the deck.
    pub fn record_review(&mut self, key: &CardKey, success: bool) -> Result<bool> {
        let Some(index) = self.cards.iter().position(|card| card.matches(key)) else {
            return Ok(false);
        };

        let previous = self.cards.clone();
        self.cards[index].review_result(success);
        self.commit(previous)?;

        log::debug!(
            "Reviewed {} ({}): success={}",
            key.english,
            key.chinese,
            success
        );
        Ok(true)
    }

    pub fn summary(&self) -> String {
        if self.cards.is_empty() {
            return EMPTY_DECK_MESSAGE.to_string();
        }

        let success_rate =
            self.num_successes as f64 / self.num_attempts.max(1) as f64 * 100.0;
        let mean_confidence = self
            .cards
            .iter()
            .map(|card| card.confidence_index)
            .sum::<f64>()
            / self.cards.len() as f64;

        format!(
            "This study set contains {} cards.\n{} cards have been reviewed ({:.2}% success rate).\nThe average confidence index is {:.2}",
            self.cards.len(),
            self.num_attempts,
            success_rate,
            mean_confidence
        )
    }

    /// One line per card, least known first.
    pub fn list_all(&self) -> String {
        if self.cards.is_empty() {
            return EMPTY_DECK_MESSAGE.to_string();
        }

        self.cards
            .iter()
            .map(|card| {
                format!(
                    "{}, {}  ({:.2})",
                    card.english, card.chinese, card.confidence_index
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Picks a card to review. Callers must check `is_empty` first;
    /// an empty deck yields None.
    pub fn select_card<R: Rng + ?Sized>(
        &self,
        method: CardSelection,
        rng: &mut R,
    ) -> Option<&Card> {
        let index = method.pick_index(self.cards.len(), rng)?;
        let card = self.cards.get(index);
        if let Some(card) = card {
            log::debug!("Selected card #{} ({}) via {:?}", index, card.english, method);
        }
        card
    }
}
