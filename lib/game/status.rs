use derive_more::Display;
use serde::{Deserialize, Serialize};

/// The status of a game of chess from the point of view of the side to move.
#[derive(Debug, Display, Default, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Status {
    #[default]
    #[display(fmt = "in progress")]
    InProgress,

    #[display(fmt = "check")]
    Check,

    #[display(fmt = "checkmate")]
    Checkmate,

    #[display(fmt = "stalemate")]
    Stalemate,
}

impl Status {
    /// Whether the game has ended and no more moves may be played.
    pub fn is_over(&self) -> bool {
        matches!(self, Status::Checkmate | Status::Stalemate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn game_starts_in_progress() {
        assert_eq!(Status::default(), Status::InProgress);
    }

    #[proptest]
    fn only_checkmate_and_stalemate_end_the_game(s: Status) {
        assert_eq!(s.is_over(), s == Status::Checkmate || s == Status::Stalemate);
    }
}
