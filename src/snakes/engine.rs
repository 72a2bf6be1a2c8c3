use log::{debug, info};

use crate::snakes::{Board, Cell, Die, Player, Redirect, RedirectKind, TurnEvent};

/// Where the engine is in its turn cycle.
///
/// `Resolving` is held from the start of [`TurnEngine::take_turn`]
/// until the host reports the notice replay drained, so triggers that
/// arrive while an animation plays are serialized into no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Resolving,
    Finished,
}

/// Outcome of applying one roll to one position. Pure data, computed
/// without touching engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Resolution {
    from: Cell,
    /// `from + roll`, or `from` when the roll overshoots the board.
    tentative: Cell,
    void: bool,
    redirect: Option<Redirect>,
    committed: Cell,
}

/// Resolves a roll against the board. Overshooting the final cell
/// voids the move; otherwise the landing cell is checked once against
/// the redirect tables.
fn resolve(board: &Board, from: Cell, roll: u8) -> Resolution {
    let void = from + roll > Board::CELLS;
    let tentative = if void { from } else { from + roll };
    let redirect = board.redirect_for(tentative);
    let committed = match redirect {
        Some(redirect) => redirect.to,
        None => tentative,
    };
    Resolution { from, tentative, void, redirect, committed }
}

/// Owns all mutable game state: both positions, whose turn it is and
/// the turn-cycle phase. The sole mutating entry point is
/// [`Self::take_turn`]; everything else is read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnEngine {
    board: Board,
    positions: [Cell; 2],
    active: Player,
    phase: Phase,
}

impl TurnEngine {
    /// Both tokens start on cell 1 and the user moves first.
    pub fn new(board: Board) -> Self {
        TurnEngine {
            board,
            positions: [1, 1],
            active: Player::User,
            phase: Phase::Idle,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn position(&self, player: Player) -> Cell {
        self.positions[Self::index(player)]
    }

    pub fn active_player(&self) -> Player {
        self.active
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the host should accept the user's roll trigger. False
    /// while a replay is pending, while the bot is to move and once
    /// the game is over.
    pub fn input_enabled(&self) -> bool {
        self.phase == Phase::Idle && self.active == Player::User
    }

    /// Whether the host should arm its timer for an automatic bot
    /// trigger.
    pub fn bot_turn_pending(&self) -> bool {
        self.phase == Phase::Idle && self.active.is_bot()
    }

    /// Resolves one full turn for the active player and returns the
    /// notice sequence for the host to replay. Returns an empty
    /// sequence without touching any state when a turn is still being
    /// replayed or the game is finished; a trigger in those phases is
    /// defined as a silent no-op, never an error.
    pub fn take_turn(&mut self) -> Vec<TurnEvent> {
        self.take_turn_with(Die::roll())
    }

    /// [`Self::take_turn`] with the roll supplied by the caller.
    /// Deterministic, used by tests and scripted drivers. The roll
    /// must be a real die face, 1..=[`Die::FACES`]; this is debug
    /// asserted, not checked in release builds.
    pub fn take_turn_with(&mut self, roll: u8) -> Vec<TurnEvent> {
        debug_assert!((1..=Die::FACES).contains(&roll));
        if self.phase != Phase::Idle {
            return Vec::new();
        }
        self.phase = Phase::Resolving;

        let player = self.active;
        let resolution = resolve(&self.board, self.position(player), roll);
        debug!(
            "{} rolled {}: {} -> {}{}",
            player.label(),
            roll,
            resolution.from,
            resolution.committed,
            if resolution.void { " (void)" } else { "" },
        );

        let mut events = Vec::with_capacity(roll as usize + 4);
        events.push(TurnEvent::Rolled { player, value: roll });

        if resolution.void {
            events.push(TurnEvent::ExactRollNeeded { player });
        } else {
            for cell in resolution.from + 1..=resolution.tentative {
                events.push(TurnEvent::Moved { player, cell });
            }
        }

        if let Some(redirect) = resolution.redirect {
            let from = resolution.tentative;
            events.push(match redirect.kind {
                RedirectKind::Snake => TurnEvent::SlidDown { player, from, to: redirect.to },
                RedirectKind::Ladder => TurnEvent::ClimbedUp { player, from, to: redirect.to },
            });
        }

        self.positions[Self::index(player)] = resolution.committed;
        events.push(TurnEvent::Landed { player, cell: resolution.committed });

        if resolution.committed == Board::CELLS {
            self.phase = Phase::Finished;
            info!("{} wins", player.label());
            events.push(TurnEvent::Won { player });
        } else {
            self.active = player.opposite();
            events.push(TurnEvent::NextTurn { player: self.active });
        }

        events
    }

    /// Host signal that the notice replay is drained. Unlocks the next
    /// trigger; does nothing once the game is finished.
    pub fn finish_replay(&mut self) {
        if self.phase == Phase::Resolving {
            self.phase = Phase::Idle;
        }
    }

    fn index(player: Player) -> usize {
        match player {
            Player::User => 0,
            Player::Bot => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(snakes: &[(Cell, Cell)], ladders: &[(Cell, Cell)]) -> TurnEngine {
        TurnEngine::new(Board::new(snakes, ladders).unwrap())
    }

    fn place(engine: &mut TurnEngine, player: Player, cell: Cell) {
        engine.positions[TurnEngine::index(player)] = cell;
    }

    #[test]
    fn plain_move_advances_by_the_roll() {
        let mut engine = engine(&[], &[]);
        let events = engine.take_turn_with(4);
        assert_eq!(engine.position(Player::User), 5);
        assert_eq!(
            events,
            vec![
                TurnEvent::Rolled { player: Player::User, value: 4 },
                TurnEvent::Moved { player: Player::User, cell: 2 },
                TurnEvent::Moved { player: Player::User, cell: 3 },
                TurnEvent::Moved { player: Player::User, cell: 4 },
                TurnEvent::Moved { player: Player::User, cell: 5 },
                TurnEvent::Landed { player: Player::User, cell: 5 },
                TurnEvent::NextTurn { player: Player::Bot },
            ]
        );
    }

    #[test]
    fn landing_on_a_ladder_climbs_once() {
        // rolling from 3 with a 1 lands on 4, ladder 4 -> 14
        let mut engine = engine(&[], &[(4, 14)]);
        place(&mut engine, Player::User, 3);
        let events = engine.take_turn_with(1);
        assert_eq!(engine.position(Player::User), 14);
        assert!(events.contains(&TurnEvent::ClimbedUp {
            player: Player::User,
            from: 4,
            to: 14
        }));
        assert!(events.contains(&TurnEvent::Landed { player: Player::User, cell: 14 }));
    }

    #[test]
    fn landing_on_a_snake_slides_once() {
        // rolling from 10 with a 6 lands on 16, snake 16 -> 6
        let mut engine = engine(&[(16, 6)], &[]);
        place(&mut engine, Player::User, 10);
        let events = engine.take_turn_with(6);
        assert_eq!(engine.position(Player::User), 6);
        assert!(events.contains(&TurnEvent::SlidDown {
            player: Player::User,
            from: 16,
            to: 6
        }));
    }

    #[test]
    fn redirects_never_chain() {
        // 4 -> 14 is a ladder and 14 -> 2 is a snake; landing on 4 must
        // stop at 14, the destination is not looked up again
        let mut engine = engine(&[(14, 2)], &[(4, 14)]);
        place(&mut engine, Player::User, 3);
        engine.take_turn_with(1);
        assert_eq!(engine.position(Player::User), 14);
    }

    #[test]
    fn overshoot_is_a_void_move() {
        let mut engine = engine(&[], &[]);
        place(&mut engine, Player::User, 95);
        let events = engine.take_turn_with(6);
        assert_eq!(engine.position(Player::User), 95);
        assert_eq!(
            events,
            vec![
                TurnEvent::Rolled { player: Player::User, value: 6 },
                TurnEvent::ExactRollNeeded { player: Player::User },
                TurnEvent::Landed { player: Player::User, cell: 95 },
                TurnEvent::NextTurn { player: Player::Bot },
            ]
        );
    }

    #[test]
    fn void_move_checks_the_current_cell_for_redirects() {
        // an overshoot leaves the token on its current cell, and that
        // cell is then looked up against the tables like any landing
        let mut engine = engine(&[(95, 75)], &[]);
        place(&mut engine, Player::User, 95);
        let events = engine.take_turn_with(6);
        assert_eq!(engine.position(Player::User), 75);
        assert_eq!(
            events,
            vec![
                TurnEvent::Rolled { player: Player::User, value: 6 },
                TurnEvent::ExactRollNeeded { player: Player::User },
                TurnEvent::SlidDown { player: Player::User, from: 95, to: 75 },
                TurnEvent::Landed { player: Player::User, cell: 75 },
                TurnEvent::NextTurn { player: Player::Bot },
            ]
        );
    }

    #[test]
    #[should_panic]
    fn out_of_range_roll_is_rejected_in_debug_builds() {
        let mut engine = engine(&[], &[]);
        engine.take_turn_with(0);
    }

    #[test]
    fn exact_roll_wins_and_locks_the_engine() {
        let mut engine = engine(&[], &[]);
        place(&mut engine, Player::User, 94);
        let events = engine.take_turn_with(6);
        assert_eq!(engine.position(Player::User), 100);
        assert_eq!(engine.phase(), Phase::Finished);
        assert_eq!(events.last(), Some(&TurnEvent::Won { player: Player::User }));
        // no turn swap after a win
        assert_eq!(engine.active_player(), Player::User);
        assert!(!events.iter().any(|e| matches!(e, TurnEvent::NextTurn { .. })));

        // a later trigger (e.g. a bot timer that was already armed)
        // must not resurrect the game
        assert!(engine.take_turn_with(3).is_empty());
        assert_eq!(engine.position(Player::User), 100);
        assert_eq!(engine.position(Player::Bot), 1);
        engine.finish_replay();
        assert_eq!(engine.phase(), Phase::Finished);
    }

    #[test]
    fn ladder_to_the_final_cell_wins() {
        let mut engine = engine(&[], &[(80, 100)]);
        place(&mut engine, Player::User, 77);
        let events = engine.take_turn_with(3);
        assert_eq!(engine.position(Player::User), 100);
        assert_eq!(engine.phase(), Phase::Finished);
        assert!(events.contains(&TurnEvent::ClimbedUp {
            player: Player::User,
            from: 80,
            to: 100
        }));
        assert_eq!(events.last(), Some(&TurnEvent::Won { player: Player::User }));
    }

    #[test]
    fn reentrant_trigger_is_a_silent_noop() {
        let mut engine = engine(&[], &[]);
        let first = engine.take_turn_with(3);
        assert!(!first.is_empty());
        assert_eq!(engine.phase(), Phase::Resolving);

        // replay still pending: no state change, no notices
        let snapshot = engine.clone();
        assert!(engine.take_turn_with(5).is_empty());
        assert_eq!(engine, snapshot);

        engine.finish_replay();
        assert_eq!(engine.phase(), Phase::Idle);
        assert!(!engine.take_turn_with(5).is_empty());
    }

    #[test]
    fn turns_alternate_between_user_and_bot() {
        let mut engine = engine(&[], &[]);
        assert!(engine.input_enabled());
        assert!(!engine.bot_turn_pending());

        engine.take_turn_with(2);
        assert!(!engine.input_enabled());
        assert!(!engine.bot_turn_pending()); // still resolving
        engine.finish_replay();
        assert!(engine.bot_turn_pending());

        // the bot's automatic trigger runs the same resolution path
        let events = engine.take_turn_with(2);
        assert_eq!(events[0], TurnEvent::Rolled { player: Player::Bot, value: 2 });
        assert_eq!(engine.position(Player::Bot), 3);
        engine.finish_replay();
        assert!(engine.input_enabled());
    }

    #[test]
    fn standard_game_terminates_with_valid_positions() {
        let mut engine = TurnEngine::new(Board::standard().unwrap());
        for _ in 0..10_000 {
            let events = engine.take_turn();
            assert!(!events.is_empty());
            for player in [Player::User, Player::Bot] {
                let position = engine.position(player);
                assert!((1..=Board::CELLS).contains(&position));
            }
            if engine.phase() == Phase::Finished {
                return;
            }
            engine.finish_replay();
        }
        panic!("no winner after 10000 turns");
    }
}
