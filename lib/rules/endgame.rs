use super::{BoardMover, PieceController, PieceId, PieceNotFound};
use crate::chess::{Board, Move, PieceState};
use crate::game::Status;
use tracing::instrument;

/// Whether any living piece of the opposite color threatens the square of the `king`.
pub fn is_in_check<'a, I>(king: &PieceController, pieces: I) -> bool
where
    I: IntoIterator<Item = &'a PieceController>,
{
    let Some(sq) = king.state().square() else {
        return false;
    };

    let side = king.state().color();
    pieces
        .into_iter()
        .any(|pc| pc.is_alive() && pc.state().color() != side && pc.threatens(sq))
}

/// Classifies the situation of a king on a [`Board`].
///
/// Every candidate move is tried out on a private copy of the board, so evaluating the
/// endgame never affects the board it was created from.
#[derive(Debug, Clone)]
pub struct Endgame {
    mover: BoardMover,
}

impl From<&Board> for Endgame {
    fn from(board: &Board) -> Self {
        Endgame::new(board)
    }
}

impl Endgame {
    /// Prepares to evaluate the given [`Board`].
    pub fn new(board: &Board) -> Self {
        Endgame {
            mover: BoardMover::from(board),
        }
    }

    /// The [`Board`] being evaluated.
    #[inline(always)]
    pub fn board(&self) -> &Board {
        self.mover.board()
    }

    /// Whether the `king` is threatened by any piece of the opposite color.
    pub fn is_in_check(&self, king: PieceState) -> Result<bool, PieceNotFound> {
        Ok(self.mover.is_in_check(self.mover.find(king)?))
    }

    /// Whether the `king` is in check and no move gets it out of check.
    pub fn is_in_checkmate(&self, king: PieceState) -> Result<bool, PieceNotFound> {
        let id = self.mover.find(king)?;
        Ok(self.mover.is_in_check(id) && !self.can_escape(id))
    }

    /// Whether the `king` is not in check, but every move would put it in check.
    pub fn is_in_stalemate(&self, king: PieceState) -> Result<bool, PieceNotFound> {
        let id = self.mover.find(king)?;
        Ok(!self.mover.is_in_check(id) && !self.can_escape(id))
    }

    /// Every move available to the side of the `king` that doesn't leave it in check.
    ///
    /// Moves are listed piece by piece, each piece's destinations in ascending order.
    pub fn legal_moves(&self, king: PieceState) -> Result<Vec<Move>, PieceNotFound> {
        Ok(self.escapes(self.mover.find(king)?).collect())
    }

    /// The [`Status`] of the game from the point of view of the side of the `king`.
    #[instrument(level = "trace", skip(self, king), ret(Display), err, fields(%king))]
    pub fn status(&self, king: PieceState) -> Result<Status, PieceNotFound> {
        let id = self.mover.find(king)?;

        let status = match (self.mover.is_in_check(id), self.can_escape(id)) {
            (true, false) => Status::Checkmate,
            (false, false) => Status::Stalemate,
            (true, true) => Status::Check,
            (false, true) => Status::InProgress,
        };

        Ok(status)
    }

    fn can_escape(&self, king: PieceId) -> bool {
        self.escapes(king).next().is_some()
    }

    /// Lazily tries out every move of the side of the `king` on a disposable mover.
    fn escapes(&self, king: PieceId) -> impl Iterator<Item = Move> + '_ {
        let side = self.mover[king].state().color();
        let mut trial = self.mover.clone();

        self.mover
            .pieces()
            .filter(move |(_, pc)| pc.is_alive() && pc.state().color() == side)
            .flat_map(|(_, pc)| {
                let state = pc.state();
                pc.moveable().into_iter().map(move |sq| Move::new(state, sq))
            })
            .filter(move |&m| match trial.play(m) {
                Err(_) => false,
                Ok(_) => {
                    let safe = !trial.is_in_check(king);
                    trial.undo().is_ok() && safe
                }
            })
    }
}
