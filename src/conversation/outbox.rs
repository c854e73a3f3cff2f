//! Outgoing side of a conversation.

/// Delivers a line of text to whoever is on the other end of the conversation.
pub trait Outbox {
    fn send(&mut self, text: String);
}

/// Collects outgoing messages in memory.
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    messages: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }

    /// Returns everything sent so far and empties the transcript.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }
}

impl Outbox for Transcript {
    fn send(&mut self, text: String) {
        self.messages.push(text);
    }
}
