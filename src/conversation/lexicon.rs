//! Command literals understood by the conversation.
//!
//! The literals are data, not code: a lexicon can be loaded from a JSON file
//! so the bot speaks another language without touching the state machine.
//! Fields missing from the file fall back to the English lexicon.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    pub stop: String,
    pub add: String,
    pub remove: String,
    pub help: String,
    pub summary: String,
    pub list: String,
    pub link: String,
    pub review: String,
    pub review_english: String,
    pub review_chinese: String,

    // Only understood during a review session
    pub reveal_link: String,
    pub reveal_chinese: String,
    pub reveal_english: String,
    pub pass: String,
    pub fail: String,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::english()
    }
}

impl Lexicon {
    pub fn english() -> Self {
        Self {
            stop: "stop".to_string(),
            add: "add".to_string(),
            remove: "remove".to_string(),
            help: "help".to_string(),
            summary: "summary".to_string(),
            list: "list".to_string(),
            link: "link".to_string(),
            review: "review".to_string(),
            review_english: "english".to_string(),
            review_chinese: "chinese".to_string(),
            reveal_link: "more".to_string(),
            reveal_chinese: "chinese".to_string(),
            reveal_english: "english".to_string(),
            pass: "yaa".to_string(),
            fail: "idk".to_string(),
        }
    }

    pub fn localized() -> Self {
        Self {
            stop: "停止".to_string(),
            add: "添加".to_string(),
            remove: "消除".to_string(),
            help: "幫助".to_string(),
            summary: "概括".to_string(),
            list: "列表".to_string(),
            link: "網址".to_string(),
            review: "實踐".to_string(),
            review_english: "英文".to_string(),
            review_chinese: "中文".to_string(),
            reveal_link: "更多".to_string(),
            reveal_chinese: "中文".to_string(),
            reveal_english: "英文".to_string(),
            pass: "對".to_string(),
            fail: "不知道".to_string(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        let lexicon: Lexicon = serde_json::from_str(&contents)?;
        lexicon.validate()?;

        log::info!("Loaded lexicon from '{}'", path.as_ref().display());
        Ok(lexicon)
    }

    /// Commands accepted while idle (plus stop, which works everywhere).
    pub fn commands(&self) -> Vec<&str> {
        vec![
            self.stop.as_str(),
            self.add.as_str(),
            self.remove.as_str(),
            self.help.as_str(),
            self.summary.as_str(),
            self.list.as_str(),
            self.link.as_str(),
            self.review.as_str(),
            self.review_english.as_str(),
            self.review_chinese.as_str(),
        ]
    }

    /// Keywords accepted during a review session.
    pub fn review_keywords(&self) -> Vec<&str> {
        vec![
            self.reveal_link.as_str(),
            self.reveal_chinese.as_str(),
            self.reveal_english.as_str(),
            self.fail.as_str(),
            self.pass.as_str(),
        ]
    }

    /// Literals must be non-empty and unique within the state that reads them.
    /// Stop is checked against both sets. Link takes an argument, so it must be
    /// a single word.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut review_set = self.review_keywords();
        review_set.push(self.stop.as_str());

        for set in [self.commands(), review_set] {
            let mut seen = HashSet::new();
            for literal in set {
                let literal = normalize(literal);
                if literal.is_empty() {
                    return Err(ConfigError::InvalidLexicon(
                        "command literals must not be empty".to_string(),
                    ));
                }
                if !seen.insert(literal.clone()) {
                    return Err(ConfigError::InvalidLexicon(format!(
                        "'{}' is used for two commands",
                        literal
                    )));
                }
            }
        }

        if normalize(&self.link).split_whitespace().count() > 1 {
            return Err(ConfigError::InvalidLexicon(format!(
                "link command '{}' must be a single word",
                self.link.trim()
            )));
        }
        Ok(())
    }

    /// Case-insensitive match. `text` is expected already trimmed and lowercased.
    pub fn is(&self, literal: &str, text: &str) -> bool {
        normalize(literal) == text
    }
}

fn normalize(literal: &str) -> String {
    literal.trim().to_lowercase()
}
