pub mod card;
pub mod deck;
pub mod selection;

pub use card::{Card, CardKey, LOOKUP_URL, normalize_chinese, normalize_english};
pub use deck::{DEFAULT_CARDS, Deck, EMPTY_DECK_MESSAGE};
pub use selection::CardSelection;
