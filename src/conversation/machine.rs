//! The conversation state machine.
//!
//! Every line of input is handled to completion, deck mutation and snapshot
//! included, before the next one is read. Stop is recognised in every state;
//! everything else is dispatched to the handler for the current state.

use super::{BotState, Lexicon, Outbox};
use crate::error::{DeckError, Result};
use crate::models::{Card, CardKey, CardSelection, Deck, EMPTY_DECK_MESSAGE, LOOKUP_URL};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex};

pub const DEFAULT_LINES_PER_MESSAGE: usize = 200;

const ADD_PROMPT: &str = "What is the English word/phrase?";
const CHINESE_PROMPT: &str = "and what is the Chinese translation?";
const REMOVE_PROMPT: &str = "What is the English or Chinese word/phrase to remove?";

/// What an input line means while idle.
enum IdleCommand {
    Help,
    Summary,
    List,
    Link(Option<String>),
    Add,
    Remove,
    Review(BotState),
    Unknown,
}

/// What an input line means during a review session.
enum ReviewInput {
    Pass,
    Fail,
    RevealLink,
    RevealChinese,
    RevealEnglish,
    Wrong,
}

pub struct Conversation<O: Outbox> {
    state: BotState,
    editing_english: String,
    editing_chinese: String,
    /// Card being quizzed. The deck owns it; only its key is kept here.
    reviewing_card: Option<CardKey>,
    deck: Arc<Mutex<Deck>>,
    outbox: O,
    lexicon: Lexicon,
    lines_per_message: usize,
    rng: StdRng,
}

impl<O: Outbox> Conversation<O> {
    pub fn new(deck: Arc<Mutex<Deck>>, outbox: O) -> Self {
        Self {
            state: BotState::Idle,
            editing_english: String::new(),
            editing_chinese: String::new(),
            reviewing_card: None,
            deck,
            outbox,
            lexicon: Lexicon::english(),
            lines_per_message: DEFAULT_LINES_PER_MESSAGE,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    pub fn with_lines_per_message(mut self, lines_per_message: usize) -> Self {
        self.lines_per_message = lines_per_message.max(1);
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn state(&self) -> BotState {
        self.state
    }

    pub fn reviewing_card(&self) -> Option<&CardKey> {
        self.reviewing_card.as_ref()
    }

    pub fn outbox(&self) -> &O {
        &self.outbox
    }

    pub fn outbox_mut(&mut self) -> &mut O {
        &mut self.outbox
    }

    pub fn deck(&self) -> &Arc<Mutex<Deck>> {
        &self.deck
    }

    /// Interprets one line of input according to the current state.
    ///
    /// Expected outcomes (duplicates, unknown cards, wrong answers) become
    /// messages. An error means the deck could not be persisted.
    pub fn handle_message(&mut self, text: &str) -> Result<()> {
        let raw = text.trim();
        if raw.is_empty() {
            return Ok(());
        }
        let lowered = raw.to_lowercase();

        if self.lexicon.is(&self.lexicon.stop, &lowered) {
            self.reset();
            self.send("oke");
            return Ok(());
        }

        let shared = Arc::clone(&self.deck);
        let mut deck = shared.lock().map_err(|_| DeckError::LockPoisoned)?;

        let before = self.state;
        match self.state {
            BotState::Idle => self.handle_idle(&deck, raw, &lowered),
            BotState::AddingEnglish => self.handle_adding_english(raw, &lowered),
            BotState::AddingChinese => self.handle_adding_chinese(&mut deck, raw)?,
            BotState::Removing => self.handle_removing(&mut deck, raw)?,
            BotState::ReviewingEng | BotState::ReviewingChi => {
                self.handle_reviewing(&mut deck, &lowered)?
            }
        }

        if before != self.state {
            log::debug!("Conversation state {:?} -> {:?}", before, self.state);
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.state = BotState::Idle;
        self.editing_english.clear();
        self.editing_chinese.clear();
        self.reviewing_card = None;
    }

    fn send(&mut self, text: impl Into<String>) {
        self.outbox.send(text.into());
    }

    fn parse_idle_command(&self, raw: &str, text: &str) -> IdleCommand {
        let lex = &self.lexicon;

        if lex.is(&lex.help, text) {
            IdleCommand::Help
        } else if lex.is(&lex.summary, text) {
            IdleCommand::Summary
        } else if lex.is(&lex.list, text) {
            IdleCommand::List
        } else if lex.is(&lex.add, text) {
            IdleCommand::Add
        } else if lex.is(&lex.remove, text) {
            IdleCommand::Remove
        } else if lex.is(&lex.review, text) || lex.is(&lex.review_english, text) {
            IdleCommand::Review(BotState::ReviewingEng)
        } else if lex.is(&lex.review_chinese, text) {
            IdleCommand::Review(BotState::ReviewingChi)
        } else {
            let mut parts = raw.splitn(2, char::is_whitespace);
            let head = parts.next().unwrap_or_default().to_lowercase();
            if lex.is(&lex.link, &head) {
                let argument = parts
                    .next()
                    .map(str::trim)
                    .filter(|arg| !arg.is_empty())
                    .map(str::to_string);
                IdleCommand::Link(argument)
            } else {
                IdleCommand::Unknown
            }
        }
    }

    fn handle_idle(&mut self, deck: &Deck, raw: &str, text: &str) {
        match self.parse_idle_command(raw, text) {
            IdleCommand::Help => {
                let commands = self.lexicon.commands().join(", ");
                self.send(format!("You can say any of these: [{}]", commands));
            }
            IdleCommand::Summary => {
                self.send(deck.summary());
            }
            IdleCommand::List => {
                let listing = deck.list_all();
                let lines: Vec<&str> = listing.lines().collect();
                for chunk in lines.chunks(self.lines_per_message) {
                    self.send(chunk.join("\n"));
                }
            }
            IdleCommand::Link(Some(argument)) => {
                self.send(format!("{}{}", LOOKUP_URL, argument));
            }
            IdleCommand::Link(None) => {
                let usage = format!("Usage: {} <chinese word/phrase>", self.lexicon.link.trim());
                self.send(usage);
            }
            IdleCommand::Add => {
                self.editing_english.clear();
                self.editing_chinese.clear();
                self.state = BotState::AddingEnglish;
                self.send(ADD_PROMPT);
            }
            IdleCommand::Remove => {
                if deck.is_empty() {
                    self.send(EMPTY_DECK_MESSAGE);
                    return;
                }
                self.editing_english.clear();
                self.editing_chinese.clear();
                self.state = BotState::Removing;
                self.send(REMOVE_PROMPT);
            }
            IdleCommand::Review(target) => {
                if deck.is_empty() {
                    self.send(EMPTY_DECK_MESSAGE);
                    return;
                }
                self.state = target;
                let direction = if target == BotState::ReviewingEng {
                    "eng->chi"
                } else {
                    "chi->eng"
                };
                self.send(format!("Beginning a review session of {}\nglhf", direction));
                self.present_next_card(deck);
            }
            IdleCommand::Unknown => {
                let hint = format!(
                    "idk what you want.. but you can ask for '{}'",
                    self.lexicon.help.trim()
                );
                self.send(hint);
            }
        }
    }

    fn handle_adding_english(&mut self, raw: &str, text: &str) {
        // Saying add again mid-session just starts the next card over
        if self.lexicon.is(&self.lexicon.add, text) {
            self.editing_english.clear();
            self.send(ADD_PROMPT);
            return;
        }

        self.editing_english = raw.to_string();
        self.state = BotState::AddingChinese;
        self.send(CHINESE_PROMPT);
    }

    fn handle_adding_chinese(&mut self, deck: &mut Deck, raw: &str) -> Result<()> {
        self.editing_chinese = raw.to_string();

        if deck.add_card(&self.editing_english, &self.editing_chinese)? {
            let key = CardKey::new(&self.editing_english, &self.editing_chinese);
            self.send(format!("Card added! ({}, {})", key.english, key.chinese));
        } else {
            self.send("Card already exists, duplicate not added");
        }

        self.editing_english.clear();
        self.editing_chinese.clear();
        self.state = BotState::AddingEnglish;
        self.send(ADD_PROMPT);
        Ok(())
    }

    fn handle_removing(&mut self, deck: &mut Deck, raw: &str) -> Result<()> {
        if deck.remove_card(raw)? {
            self.send(format!("Card Removed! ({})", raw));
        } else {
            self.send("Card not found and not removed");
        }

        if deck.is_empty() {
            self.reset();
            self.send(EMPTY_DECK_MESSAGE);
        } else {
            self.send(REMOVE_PROMPT);
        }
        Ok(())
    }

    fn parse_review_input(&self, card: &Card, text: &str) -> ReviewInput {
        let lex = &self.lexicon;
        let expected = match self.state {
            BotState::ReviewingChi => card.english.clone(),
            _ => card.chinese.to_lowercase(),
        };

        if text == expected || lex.is(&lex.pass, text) {
            ReviewInput::Pass
        } else if lex.is(&lex.fail, text) {
            ReviewInput::Fail
        } else if lex.is(&lex.reveal_link, text) {
            ReviewInput::RevealLink
        } else if lex.is(&lex.reveal_chinese, text) {
            ReviewInput::RevealChinese
        } else if lex.is(&lex.reveal_english, text) {
            ReviewInput::RevealEnglish
        } else {
            ReviewInput::Wrong
        }
    }

    fn handle_reviewing(&mut self, deck: &mut Deck, text: &str) -> Result<()> {
        let current = self
            .reviewing_card
            .as_ref()
            .and_then(|key| deck.find(key))
            .cloned();
        let Some(card) = current else {
            // Removed from the shared deck since it was shown
            self.send("That card is no longer in the deck.");
            self.present_next_card(deck);
            return Ok(());
        };
        let key = card.key();

        match self.parse_review_input(&card, text) {
            ReviewInput::Pass => {
                deck.record_review(&key, true)?;
                self.send(":)");
                self.present_next_card(deck);
            }
            ReviewInput::Fail => {
                deck.record_review(&key, false)?;
                self.send(":(");
                self.present_next_card(deck);
            }
            ReviewInput::RevealLink => {
                self.send(card.lookup_link());
            }
            ReviewInput::RevealChinese => {
                self.send(card.chinese);
            }
            ReviewInput::RevealEnglish => {
                self.send(card.english);
            }
            ReviewInput::Wrong => {
                deck.record_review(&key, false)?;
                let keywords = self.lexicon.review_keywords().join(", ");
                self.send(format!(
                    "that's not it, try again!\nYou can also respond with [{}]",
                    keywords
                ));
            }
        }
        Ok(())
    }

    /// Selects the next card and shows the side the learner translates from.
    fn present_next_card(&mut self, deck: &Deck) {
        let Some(card) = deck.select_card(CardSelection::ConfidenceWeighted, &mut self.rng) else {
            self.reset();
            self.send(EMPTY_DECK_MESSAGE);
            return;
        };

        let prompt = match self.state {
            BotState::ReviewingChi => card.chinese.clone(),
            _ => card.english.clone(),
        };
        self.reviewing_card = Some(card.key());
        self.send(prompt);
    }
}
