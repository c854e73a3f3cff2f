pub mod lexicon;
pub mod machine;
pub mod outbox;
pub mod state;

pub use lexicon::Lexicon;
pub use machine::{Conversation, DEFAULT_LINES_PER_MESSAGE};
pub use outbox::{Outbox, Transcript};
pub use state::BotState;
