use crate::chess::{Color, Piece, Role, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The state of a single piece at one instant: what it is and where it stands.
///
/// A piece that has been captured has no [`Square`].
/// Moving a piece never mutates its state, it produces a new one instead.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(deny_unknown_fields)]
pub struct PieceState {
    piece: Piece,
    square: Option<Square>,
}

impl PieceState {
    /// Constructs the state of a living piece.
    #[inline(always)]
    pub fn new(role: Role, color: Color, square: Square) -> Self {
        PieceState {
            piece: Piece::new(role, color),
            square: Some(square),
        }
    }

    /// Constructs the state of a [`Piece`] on a [`Square`], or off the board if `None`.
    #[inline(always)]
    pub fn placed(piece: Piece, square: Option<Square>) -> Self {
        PieceState { piece, square }
    }

    /// This piece.
    #[inline(always)]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// This piece's [`Role`].
    #[inline(always)]
    pub fn role(&self) -> Role {
        self.piece.role()
    }

    /// This piece's [`Color`].
    #[inline(always)]
    pub fn color(&self) -> Color {
        self.piece.color()
    }

    /// The [`Square`] this piece stands on, or `None` if captured.
    #[inline(always)]
    pub fn square(&self) -> Option<Square> {
        self.square
    }

    /// Whether this piece is still on the board.
    #[inline(always)]
    pub fn is_alive(&self) -> bool {
        self.square.is_some()
    }

    /// The state of this same piece relocated to `square`.
    #[inline(always)]
    pub fn relocated(&self, square: Option<Square>) -> Self {
        PieceState { square, ..*self }
    }
}

impl fmt::Display for PieceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.square {
            Some(sq) => write!(f, "{} {} on {}", self.color(), self.role(), sq),
            None => write!(f, "captured {} {}", self.color(), self.role()),
        }
    }
}
