//! Console binding for the vocabulary bot.
//! Every stdin line is one incoming chat message; replies go to stdout.

use clap::Parser;
use std::error::Error;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use vocab_trainer::conversation::DEFAULT_LINES_PER_MESSAGE;
use vocab_trainer::*;

#[derive(Parser, Debug)]
#[command(name = "vocab-bot", about = "Spaced-repetition English/Chinese vocabulary bot", version)]
struct Args {
    /// Deck snapshot file
    #[arg(short, long, default_value = "cards.json")]
    data: PathBuf,

    /// Snapshot format
    #[arg(short, long, value_enum, default_value = "json")]
    backend: StorageBackend,

    /// JSON file overriding the command words
    #[arg(short, long)]
    lexicon: Option<PathBuf>,

    /// Use the built-in Chinese command words
    #[arg(long, conflicts_with = "lexicon")]
    localized: bool,

    /// Maximum lines per message when listing the deck
    #[arg(long, default_value_t = DEFAULT_LINES_PER_MESSAGE)]
    lines_per_message: usize,

    /// Start a missing deck empty instead of with the starter cards
    #[arg(long)]
    empty: bool,
}

struct StdoutOutbox;

impl Outbox for StdoutOutbox {
    fn send(&mut self, text: String) {
        println!("{}", text);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut config = Config {
        data_path: args.data,
        backend: args.backend,
        lines_per_message: args.lines_per_message,
        starter_cards: !args.empty,
        ..Config::default()
    };
    if let Some(path) = args.lexicon {
        config.load_lexicon(path)?;
    } else if args.localized {
        config.lexicon = Lexicon::localized();
    }

    let deck = Deck::open(config.open_store()?, config.starter_cards)?;
    log::info!(
        "Loaded deck from '{}' ({} cards)",
        config.data_path.display(),
        deck.len()
    );

    let mut conversation = Conversation::new(Arc::new(Mutex::new(deck)), StdoutOutbox)
        .with_lexicon(config.lexicon)
        .with_lines_per_message(config.lines_per_message);

    for line in io::stdin().lock().lines() {
        let line = line?;
        if let Err(err) = conversation.handle_message(&line) {
            log::error!("Giving up, deck state could not be saved: {}", err);
            return Err(err.into());
        }
    }

    Ok(())
}
