use crate::chess::{Bitboard, Color, File, Piece, PieceState, Rank, Role, Square};
use crate::util::Enum;
use arrayvec::ArrayString;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use std::{ops::Index, str::FromStr};

/// An immutable snapshot of every [`PieceState`] on the chess board at one instant.
///
/// Captured pieces are part of the snapshot, they just don't stand on any square.
/// Snapshots compare equal if they hold the same piece states, regardless of the order
/// in which they were collected.
#[derive(Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(from = "Vec<PieceState>", into = "Vec<PieceState>")]
pub struct Board {
    pieces: Vec<PieceState>,
    squares: [Option<Piece>; 64],
}

impl Default for Board {
    /// The standard starting arrangement.
    fn default() -> Self {
        use Role::*;
        const BACK_RANK: [Role; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        Color::iter()
            .flat_map(|c| {
                let home = BACK_RANK.into_iter().zip(File::iter()).map(move |(r, f)| {
                    PieceState::new(r, c, Square::new(f, Rank::home(c)))
                });

                let pawns = File::iter()
                    .map(move |f| PieceState::new(Pawn, c, Square::new(f, Rank::pawns(c))));

                home.chain(pawns)
            })
            .collect()
    }
}

impl Board {
    /// An iterator over every piece state, living or captured, in a canonical order.
    #[inline(always)]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = PieceState> + ExactSizeIterator + '_ {
        self.pieces.iter().copied()
    }

    /// An iterator over the pieces still on the board.
    #[inline(always)]
    pub fn alive(&self) -> impl Iterator<Item = PieceState> + '_ {
        self.iter().filter(PieceState::is_alive)
    }

    /// The number of piece states in this snapshot.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Whether this snapshot holds no pieces at all.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// The [`Piece`] on the given [`Square`], if any.
    #[inline(always)]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.repr() as usize]
    }

    /// The [`Color`] of the piece on the given [`Square`], if any.
    #[inline(always)]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.piece_on(sq).map(|p| p.color())
    }

    /// [`Square`]s occupied by pieces of a [`Color`].
    #[inline(always)]
    pub fn by_color(&self, c: Color) -> Bitboard {
        Square::iter()
            .filter(|&sq| self.color_on(sq) == Some(c))
            .collect()
    }

    /// [`Square`]s occupied by kings of either color.
    #[inline(always)]
    pub fn kings(&self) -> Bitboard {
        Square::iter()
            .filter(|&sq| self.piece_on(sq).map(|p| p.role()) == Some(Role::King))
            .collect()
    }

    /// [`Square`] occupied by the king of a [`Color`], if there is exactly one.
    #[inline(always)]
    pub fn king(&self, side: Color) -> Option<Square> {
        let kings = self.kings() & self.by_color(side);
        if kings.len() == 1 {
            kings.iter().next()
        } else {
            None
        }
    }
}

impl FromIterator<PieceState> for Board {
    fn from_iter<I: IntoIterator<Item = PieceState>>(iter: I) -> Self {
        let mut pieces = Vec::from_iter(iter);
        pieces.sort_unstable();

        let mut squares = [None; 64];
        for s in &pieces {
            if let Some(sq) = s.square() {
                squares[sq.repr() as usize] = Some(s.piece());
            }
        }

        Board { pieces, squares }
    }
}

impl From<Vec<PieceState>> for Board {
    #[inline(always)]
    fn from(pieces: Vec<PieceState>) -> Self {
        pieces.into_iter().collect()
    }
}

impl From<Board> for Vec<PieceState> {
    #[inline(always)]
    fn from(board: Board) -> Self {
        board.pieces
    }
}

/// Retrieves the [`Piece`] at a given [`Square`], if any.
impl Index<Square> for Board {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.squares[sq.repr() as usize]
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let captured = Vec::from_iter(self.iter().filter(|s| !s.is_alive()).map(|s| s.piece()));
        f.debug_struct("Board")
            .field("placement", &format_args!("{self}"))
            .field("captured", &captured)
            .finish()
    }
}

/// Prints the placement of living pieces in [FEN] notation.
///
/// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut skip = 0;
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                let mut buffer = ArrayString::<2>::new();

                match self[Square::new(file, rank)] {
                    None => skip += 1,
                    Some(p) => write!(buffer, "{}", p)?,
                }

                if file == File::H && rank > Rank::First {
                    buffer.push('/');
                }

                if !buffer.is_empty() && skip > 0 {
                    write!(f, "{}", skip)?;
                    skip = 0;
                }

                f.write_str(&buffer)?;
            }
        }

        if skip > 0 {
            write!(f, "{}", skip)?;
        }

        Ok(())
    }
}

/// The reason why parsing the piece placement failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum ParseBoardError {
    #[display(fmt = "failed to parse piece placement, expected 8 ranks")]
    InvalidRankCount,
    #[display(fmt = "failed to parse piece placement, expected 8 squares per rank")]
    InvalidFileCount,
    #[display(fmt = "failed to parse piece placement, unexpected character")]
    InvalidPiece,
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ranks: Vec<_> = s.split('/').rev().collect();
        if ranks.len() != 8 {
            return Err(ParseBoardError::InvalidRankCount);
        }

        let mut pieces = Vec::new();
        for (rank, segment) in Rank::iter().zip(ranks) {
            let mut file = 0;
            for c in segment.chars() {
                let mut buffer = [0; 4];

                if let Some(skip) = c.to_digit(10).filter(|&d| (1..=8).contains(&d)) {
                    file += skip;
                } else if let Ok(p) = c.encode_utf8(&mut buffer).parse::<Piece>() {
                    let Some(f) = File::try_from_repr(file as u8) else {
                        return Err(ParseBoardError::InvalidFileCount);
                    };

                    pieces.push(PieceState::placed(p, Some(Square::new(f, rank))));
                    file += 1;
                } else {
                    return Err(ParseBoardError::InvalidPiece);
                }

                if file > 8 {
                    return Err(ParseBoardError::InvalidFileCount);
                }
            }

            if file != 8 {
                return Err(ParseBoardError::InvalidFileCount);
            }
        }

        Ok(Board::from(pieces))
    }
}

// We provide a custom implementation of Arbitrary rather than deriving,
// so that no two living pieces share a square.
#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Board {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Board>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::{collection::vec, option::weighted, prelude::*};

        (
            vec(weighted(0.3, any::<Piece>()), 64),
            vec(any::<Piece>(), 0..4),
        )
            .prop_map(|(squares, captured)| {
                let alive = Square::iter()
                    .zip(squares)
                    .filter_map(|(sq, p)| Some(PieceState::placed(p?, Some(sq))));

                let dead = captured.into_iter().map(|p| PieceState::placed(p, None));
                alive.chain(dead).collect()
            })
            .boxed()
    }
}
