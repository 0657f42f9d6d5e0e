use crate::chess::{Color, PieceState, Role, Square};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A chess move: a piece in a given state and the square it is headed to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Move {
    piece: PieceState,
    whither: Square,
}

impl Move {
    /// Constructs [`Move`] of a piece to a [`Square`].
    #[inline(always)]
    pub fn new(piece: PieceState, whither: Square) -> Self {
        Move { piece, whither }
    }

    /// The state of the piece before the move.
    #[inline(always)]
    pub fn piece(&self) -> PieceState {
        self.piece
    }

    /// The source [`Square`], or `None` if the piece is not on the board.
    #[inline(always)]
    pub fn whence(&self) -> Option<Square> {
        self.piece.square()
    }

    /// The destination [`Square`].
    #[inline(always)]
    pub fn whither(&self) -> Square {
        self.whither
    }
}

/// Prints the piece letter followed by the source and destination squares, e.g. `Pe2e3`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.piece.piece(), f)?;

        match self.whence() {
            Some(sq) => fmt::Display::fmt(&sq, f)?,
            None => f.write_str("--")?,
        }

        fmt::Display::fmt(&self.whither, f)
    }
}

/// The reason why a piece may not make a [`Move`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum IllegalMove {
    #[display(fmt = "{} {} is not allowed to move to {}", color, role, square)]
    Unreachable {
        color: Color,
        role: Role,
        square: Square,
    },

    #[display(fmt = "{} {} is not allowed to move as it has been captured", color, role)]
    Captured { color: Color, role: Role },
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn move_remembers_its_source_and_destination(s: PieceState, sq: Square) {
        let m = Move::new(s, sq);
        assert_eq!(m.piece(), s);
        assert_eq!(m.whence(), s.square());
        assert_eq!(m.whither(), sq);
    }

    #[test]
    fn move_is_printed_as_piece_followed_by_squares() {
        let pawn = PieceState::new(Role::Pawn, Color::White, Square::E2);
        assert_eq!(Move::new(pawn, Square::E3).to_string(), "Pe2e3");
        assert_eq!(Move::new(pawn.relocated(None), Square::E3).to_string(), "P--e3");
    }

    #[test]
    fn illegal_move_names_color_role_and_square() {
        let e = IllegalMove::Unreachable {
            color: Color::Black,
            role: Role::Rook,
            square: Square::H1,
        };

        assert_eq!(e.to_string(), "black rook is not allowed to move to h1");
    }
}
