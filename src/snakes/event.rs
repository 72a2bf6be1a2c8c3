use crate::snakes::{Cell, Player};

/// Tint of a message notice, mirroring the host's message styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Neutral,
    Warning,
    Snake,
    Ladder,
    Win,
}

/// One notice emitted while resolving a turn. A resolved turn always
/// produces, in order: `Rolled`, then either `ExactRollNeeded` or one
/// `Moved` per intermediate cell, then at most one `SlidDown` or
/// `ClimbedUp`, then `Landed` with the committed cell, then `Won` or
/// `NextTurn`.
///
/// The `Moved` steps are cosmetic. The engine has already committed the
/// final position when the host starts replaying them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEvent {
    Rolled { player: Player, value: u8 },
    Moved { player: Player, cell: Cell },
    ExactRollNeeded { player: Player },
    SlidDown { player: Player, from: Cell, to: Cell },
    ClimbedUp { player: Player, from: Cell, to: Cell },
    Landed { player: Player, cell: Cell },
    Won { player: Player },
    NextTurn { player: Player },
}

impl TurnEvent {
    /// The position notice carried by this event, if it is one.
    pub fn position(&self) -> Option<(Player, Cell)> {
        match *self {
            TurnEvent::Moved { player, cell } | TurnEvent::Landed { player, cell } => {
                Some((player, cell))
            }
            _ => None,
        }
    }

    /// The message notice carried by this event, if it is one.
    pub fn message(&self) -> Option<(String, Severity)> {
        match *self {
            TurnEvent::Rolled { player, value } => {
                Some((format!("{} rolled a {}!", player.label(), value), Severity::Neutral))
            }
            TurnEvent::ExactRollNeeded { player } => Some((
                format!("{} needs exact roll to finish!", player.label()),
                Severity::Warning,
            )),
            TurnEvent::SlidDown { player, to, .. } => Some((
                format!("{} hit a snake! Slid down to {}", player.label(), to),
                Severity::Snake,
            )),
            TurnEvent::ClimbedUp { player, to, .. } => Some((
                format!("{} found a ladder! Climbed up to {}", player.label(), to),
                Severity::Ladder,
            )),
            TurnEvent::Won { player } => {
                Some((format!("{} wins!", player.label()), Severity::Win))
            }
            TurnEvent::Moved { .. } | TurnEvent::Landed { .. } | TurnEvent::NextTurn { .. } => {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_events_carry_positions_not_messages() {
        let step = TurnEvent::Moved { player: Player::User, cell: 7 };
        assert_eq!(step.position(), Some((Player::User, 7)));
        assert_eq!(step.message(), None);
    }

    #[test]
    fn notices_carry_the_expected_severity() {
        let snake = TurnEvent::SlidDown { player: Player::Bot, from: 16, to: 6 };
        let (text, severity) = snake.message().unwrap();
        assert_eq!(severity, Severity::Snake);
        assert_eq!(text, "Bot hit a snake! Slid down to 6");

        let win = TurnEvent::Won { player: Player::User };
        assert_eq!(win.message().unwrap().1, Severity::Win);
    }
}
