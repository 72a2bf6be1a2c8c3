use rand::random_range;

/// The single six-sided die. Both participants roll the same die, the
/// bot gets no other input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Die;

impl Die {
    pub const FACES: u8 = 6;

    /// Draws a face uniformly from 1..=6.
    pub fn roll() -> u8 {
        random_range(1..=Self::FACES)
    }
}
