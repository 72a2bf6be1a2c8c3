mod board;
pub use board::Board;
pub use board::ConfigError;
pub use board::Redirect;
pub use board::RedirectKind;
pub use board::grid_position;

mod die;
pub use die::Die;

mod player;
pub use player::Player;

mod event;
pub use event::Severity;
pub use event::TurnEvent;

mod engine;
pub use engine::Phase;
pub use engine::TurnEngine;

/// A cell number on the board, 1 to [`Board::CELLS`].
pub type Cell = u8;
