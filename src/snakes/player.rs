#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    User,
    Bot,
}

impl Player {
    pub fn opposite(&self) -> Player {
        match self {
            Player::User => Player::Bot,
            Player::Bot => Player::User,
        }
    }

    /// Display name used in notices and on the side panel.
    pub fn label(&self) -> &'static str {
        match self {
            Player::User => "User",
            Player::Bot => "Bot",
        }
    }

    /// The bot never waits for external input; its turns are triggered
    /// by the host's timer.
    pub fn is_bot(&self) -> bool {
        matches!(self, Player::Bot)
    }
}
