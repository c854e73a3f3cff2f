//! Card is a pair <english, chinese> plus the statistics gathered while reviewing it
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix for the character breakdown link. The chinese field is appended unescaped.
pub const LOOKUP_URL: &str = "https://www.moedict.tw/";

/// Normalized identity of a card. Two cards with equal keys are duplicates.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardKey {
    pub english: String,
    pub chinese: String,
}

impl CardKey {
    pub fn new(english: &str, chinese: &str) -> Self {
        Self {
            english: normalize_english(english),
            chinese: normalize_chinese(chinese),
        }
    }
}

pub fn normalize_english(english: &str) -> String {
    english.trim().to_lowercase()
}

pub fn normalize_chinese(chinese: &str) -> String {
    chinese.trim().to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub english: String,
    pub chinese: String,
    pub num_attempts: u32,
    pub num_successes: u32,
    /// None until the card is reviewed for the first time.
    pub last_attempt: Option<DateTime<Utc>>,
    /// Days. Tracked but not used to gate reviews.
    pub study_interval: u32,
    /// Mastery estimate in [0, 1].
    pub confidence_index: f64,
}

impl Card {
    pub fn new(english: &str, chinese: &str) -> Self {
        Self {
            english: normalize_english(english),
            chinese: normalize_chinese(chinese),
            num_attempts: 0,
            num_successes: 0,
            last_attempt: None,
            study_interval: 1,
            confidence_index: 0.0,
        }
    }

    pub fn key(&self) -> CardKey {
        CardKey {
            english: self.english.clone(),
            chinese: self.chinese.clone(),
        }
    }

    pub fn matches(&self, key: &CardKey) -> bool {
        self.english == key.english && self.chinese == key.chinese
    }

    /// Link to an external dictionary entry for the chinese text.
    pub fn lookup_link(&self) -> String {
        format!("{}{}", LOOKUP_URL, self.chinese)
    }

    /// Updates the statistics after a review.
    pub fn review_result(&mut self, success: bool) {
        self.review_result_at(success, Utc::now());
    }

    /// A success multiplies the study interval by 1.5 rounding up, a failure
    /// divides it by 1.5 rounding down with a floor of 1. The arithmetic is
    /// exact on integers and the interval saturates at `u32::MAX` days.
    pub fn review_result_at(&mut self, success: bool, now: DateTime<Utc>) {
        self.last_attempt = Some(now);
        self.num_attempts += 1;

        if success {
            self.num_successes += 1;
            self.study_interval = self
                .study_interval
                .saturating_add(self.study_interval.div_ceil(2));
            // num_attempts >= 1 here
            let success_ratio = self.num_successes as f64 / self.num_attempts as f64;
            self.confidence_index = (self.confidence_index + 0.1 * success_ratio).min(1.0);
        } else {
            // 2 * u32::MAX / 3 fits back in u32
            self.study_interval = ((self.study_interval as u64 * 2 / 3) as u32).max(1);
            self.confidence_index = (self.confidence_index - 0.1).max(0.0);
        }
    }

    /// Multi-line description with all statistics.
    pub fn details(&self) -> String {
        let last_attempt = self
            .last_attempt
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string());
        format!(
            "{}\n{}\nSuccesses: {}\nAttempts: {}\nLast Attempt: {}\nStudy Interval: {}\nConfidence: {:.2}",
            self.english,
            self.chinese,
            self.num_successes,
            self.num_attempts,
            last_attempt,
            self.study_interval,
            self.confidence_index
        )
    }
}
