use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use vocab_trainer::storage::{DeckStore, JsonStore, SqliteStore};
use vocab_trainer::*;

fn open_deck(store: Box<dyn DeckStore + Send>) -> Arc<Mutex<Deck>> {
    Arc::new(Mutex::new(Deck::open(store, false).unwrap()))
}

fn conversation(deck: &Arc<Mutex<Deck>>, seed: u64) -> Conversation<Transcript> {
    Conversation::new(Arc::clone(deck), Transcript::new()).with_rng(StdRng::seed_from_u64(seed))
}

fn say_all(conv: &mut Conversation<Transcript>, lines: &[&str]) {
    for line in lines {
        conv.handle_message(line).unwrap();
    }
}

#[test]
fn test_two_add_sessions_then_stop() {
    let dir = TempDir::new().unwrap();
    let deck = open_deck(Box::new(JsonStore::new(dir.path().join("cards.json"))));
    let mut conv = conversation(&deck, 1);

    say_all(&mut conv, &["add", "foo", "bar", "add", "baz", "qux", "stop"]);

    assert_eq!(conv.state(), BotState::Idle);
    let deck = deck.lock().unwrap();
    assert_eq!(deck.len(), 2);
    assert!(deck.find(&CardKey::new("foo", "bar")).is_some());
    assert!(deck.find(&CardKey::new("baz", "qux")).is_some());
}

#[test]
fn test_review_round_trip_is_persisted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cards.json");
    let deck = open_deck(Box::new(JsonStore::new(&path)));
    let mut conv = conversation(&deck, 5);

    say_all(&mut conv, &["add", "hello", "你好", "stop", "review"]);
    assert_eq!(conv.state(), BotState::ReviewingEng);
    assert_eq!(conv.reviewing_card(), Some(&CardKey::new("hello", "你好")));

    say_all(&mut conv, &["你好", "idk", "stop"]);
    let sent = conv.outbox().messages();
    assert!(sent.iter().any(|m| m == ":)"));
    assert!(sent.iter().any(|m| m == ":("));

    let reopened = Deck::open(Box::new(JsonStore::new(&path)), true).unwrap();
    let card = reopened.find(&CardKey::new("hello", "你好")).unwrap();
    assert_eq!(card.num_attempts, 2);
    assert_eq!(card.num_successes, 1);
    assert_eq!(card.study_interval, 1);
    assert!(card.last_attempt.is_some());
}

#[test]
fn test_summary_after_reviews() {
    let dir = TempDir::new().unwrap();
    let deck = open_deck(Box::new(SqliteStore::open(dir.path().join("cards.sqlite3")).unwrap()));
    let mut conv = conversation(&deck, 9);

    say_all(&mut conv, &["add", "cat", "猫", "stop", "review", "yaa", "yaa", "stop", "summary"]);

    let summary = conv.outbox().last().unwrap();
    assert!(summary.contains("This study set contains 1 cards."));
    assert!(summary.contains("2 cards have been reviewed (100.00% success rate)."));
    assert!(summary.contains("The average confidence index is 0.20"));
}

#[test]
fn test_conversations_share_one_deck() {
    let dir = TempDir::new().unwrap();
    let deck = open_deck(Box::new(JsonStore::new(dir.path().join("cards.json"))));
    let mut alice = conversation(&deck, 1);
    let mut bob = conversation(&deck, 2);

    say_all(&mut alice, &["add", "cat", "猫", "stop", "review"]);
    assert_eq!(alice.reviewing_card(), Some(&CardKey::new("cat", "猫")));

    say_all(&mut bob, &["add", "dog", "狗", "stop", "remove", "cat"]);
    assert_eq!(deck.lock().unwrap().len(), 1);

    // Alice's card is gone; she is moved on to one that still exists
    alice.handle_message("猫").unwrap();
    let sent = alice.outbox_mut().take();
    assert!(sent.contains(&"That card is no longer in the deck.".to_string()));
    assert_eq!(alice.reviewing_card(), Some(&CardKey::new("dog", "狗")));
    assert_eq!(alice.state(), BotState::ReviewingEng);
}

#[test]
fn test_shared_deck_across_threads() {
    let dir = TempDir::new().unwrap();
    let deck = open_deck(Box::new(JsonStore::new(dir.path().join("cards.json"))));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let deck = Arc::clone(&deck);
            std::thread::spawn(move || {
                let mut conv = conversation(&deck, i);
                conv.handle_message("add").unwrap();
                for j in 0..5 {
                    conv.handle_message(&format!("word{}-{}", i, j)).unwrap();
                    conv.handle_message(&format!("詞{}-{}", i, j)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(deck.lock().unwrap().len(), 20);
}

#[test]
fn test_starter_deck_on_first_run() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cards.json");
    let deck = Deck::open(Box::new(JsonStore::new(&path)), true).unwrap();

    assert!(path.exists());
    assert!(deck.find(&CardKey::new("add", "添加")).is_some());
    assert!(deck.find(&CardKey::new("Chinese Language", "中文")).is_some());
}
