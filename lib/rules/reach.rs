use crate::chess::{Bitboard, Board, Color, PieceState, Role, Square};

/// How a square on the board looks to a piece of some [`Color`] wanting to enter it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Availability {
    /// No piece stands on the square.
    Empty,
    /// An enemy piece that can be captured stands on the square.
    Available,
    /// A king of either color, or a friendly piece, stands on the square.
    Blocked,
}

impl Availability {
    /// Classifies a [`Square`] for a piece of color `side`.
    #[inline(always)]
    pub fn of(sq: Square, side: Color, board: &Board) -> Self {
        match board[sq] {
            None => Availability::Empty,
            Some(p) if p.role() == Role::King || p.color() == side => Availability::Blocked,
            Some(_) => Availability::Available,
        }
    }
}

const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAGONALS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

#[rustfmt::skip]
const KNIGHT: [(i8, i8); 8] = [
    (1, 2), (-1, 2), (1, -2), (-1, -2),
    (2, 1), (2, -1), (-2, 1), (-2, -1),
];

#[rustfmt::skip]
const KING: [(i8, i8); 8] = [
    (-1, 1), (0, 1), (1, 1),
    (-1, 0),         (1, 0),
    (-1, -1), (0, -1), (1, -1),
];

/// The squares a piece may move to and the squares it attacks or defends.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Reach {
    /// Squares the piece may currently relocate to.
    pub moveable: Bitboard,
    /// Squares the piece attacks or defends, only relevant to check detection.
    pub threatened: Bitboard,
}

impl Reach {
    /// Computes the [`Reach`] of a piece on a [`Board`].
    ///
    /// A captured piece reaches nothing.
    pub fn compute(piece: PieceState, board: &Board) -> Self {
        let Some(sq) = piece.square() else {
            return Reach::default();
        };

        let side = piece.color();
        match piece.role() {
            Role::Pawn => Self::pawn(sq, side, board),
            Role::Knight => Self::leaps(sq, side, &KNIGHT, board),
            Role::Bishop => Self::rays(sq, side, &DIAGONALS, board),
            Role::Rook => Self::rays(sq, side, &ORTHOGONALS, board),
            Role::Queen => Self::rays(sq, side, &ORTHOGONALS, board)
                .union(Self::rays(sq, side, &DIAGONALS, board)),
            Role::King => Self::leaps(sq, side, &KING, board),
        }
    }

    fn union(self, other: Reach) -> Self {
        Reach {
            moveable: self.moveable | other.moveable,
            threatened: self.threatened | other.threatened,
        }
    }

    /// Walks every ray until it leaves the board or hits a piece.
    fn rays(sq: Square, side: Color, steps: &[(i8, i8)], board: &Board) -> Self {
        let mut reach = Reach::default();

        for &(df, dr) in steps {
            let mut next = sq.offset(df, dr);
            while let Some(target) = next {
                reach.threatened = reach.threatened.with(target);

                match Availability::of(target, side, board) {
                    Availability::Blocked => break,
                    Availability::Available => {
                        reach.moveable = reach.moveable.with(target);
                        break;
                    }
                    Availability::Empty => {
                        reach.moveable = reach.moveable.with(target);
                        next = target.offset(df, dr);
                    }
                }
            }
        }

        reach
    }

    /// Jumps to each offset independently.
    fn leaps(sq: Square, side: Color, steps: &[(i8, i8)], board: &Board) -> Self {
        let mut reach = Reach::default();

        for target in steps.iter().filter_map(|&(df, dr)| sq.offset(df, dr)) {
            reach.threatened = reach.threatened.with(target);
            if Availability::of(target, side, board) != Availability::Blocked {
                reach.moveable = reach.moveable.with(target);
            }
        }

        reach
    }

    /// Pawns push forward onto empty squares and capture only diagonally.
    fn pawn(sq: Square, side: Color, board: &Board) -> Self {
        let mut reach = Reach::default();
        let dr = side.forward();

        for target in [-1, 1].into_iter().filter_map(|df| sq.offset(df, dr)) {
            reach.threatened = reach.threatened.with(target);
            if Availability::of(target, side, board) == Availability::Available {
                reach.moveable = reach.moveable.with(target);
            }
        }

        if let Some(target) = sq.offset(0, dr) {
            if Availability::of(target, side, board) == Availability::Empty {
                reach.moveable = reach.moveable.with(target);
            }
        }

        reach
    }
}
