/// How the next line of input is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BotState {
    #[default]
    Idle,
    AddingEnglish,
    AddingChinese,
    Removing,
    /// English shown, chinese expected.
    ReviewingEng,
    /// Chinese shown, english expected.
    ReviewingChi,
}

