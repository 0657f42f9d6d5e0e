use super::{endgame, PieceController};
use crate::chess::{Board, IllegalMove, Move, PieceState, Square};
use derive_more::{Display, Error, From};
use std::ops::Index;
use tracing::{debug, instrument};

/// Identifies a piece controlled by a [`BoardMover`], whether alive or captured.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[display(fmt = "#{_0}")]
pub struct PieceId(usize);

/// Indicates that no living piece in a given state is under control.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "`{_0}` was not found on the board")]
pub struct PieceNotFound(#[error(not(source))] pub PieceState);

/// Indicates that there is no [`Move`] to revert.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "there is no move to undo")]
pub struct NothingToUndo;

/// The reason why a [`Move`] could not be played.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error, From)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum MoveError {
    IllegalMove(IllegalMove),
    PieceNotFound(PieceNotFound),
}

/// Applies moves to a set of [`PieceController`]s.
///
/// Pieces are kept in an arena and addressed by [`PieceId`]; captured pieces stay in the
/// arena so a capture can be reverted. Every change is followed by a fresh [`Board`]
/// being published to every controller.
#[derive(Debug, Clone)]
pub struct BoardMover {
    pieces: Vec<PieceController>,
    board: Board,
    last: Vec<(PieceId, Option<Square>)>,
}

impl Default for BoardMover {
    /// A mover that controls no pieces.
    fn default() -> Self {
        BoardMover {
            pieces: Vec::new(),
            board: Board::from(Vec::new()),
            last: Vec::new(),
        }
    }
}

impl From<&Board> for BoardMover {
    fn from(board: &Board) -> Self {
        let mut mover = BoardMover::default();
        mover.add_pieces(board);
        mover
    }
}

impl Index<PieceId> for BoardMover {
    type Output = PieceController;

    /// The [`PieceController`] with the given [`PieceId`].
    ///
    /// # Panics
    ///
    /// Panics if the id was not issued by this mover.
    #[inline(always)]
    fn index(&self, id: PieceId) -> &Self::Output {
        &self.pieces[id.0]
    }
}

impl BoardMover {
    /// The latest published [`Board`].
    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// An iterator over every controlled piece, in the order they were added.
    #[inline(always)]
    pub fn pieces(
        &self,
    ) -> impl DoubleEndedIterator<Item = (PieceId, &PieceController)> + ExactSizeIterator {
        self.pieces.iter().enumerate().map(|(i, pc)| (PieceId(i), pc))
    }

    /// Takes control of every piece on the [`Board`].
    ///
    /// Returns the ids of the new pieces in the order they appear on the board.
    /// The last move can no longer be undone afterwards.
    pub fn add_pieces(&mut self, board: &Board) -> Vec<PieceId> {
        let start = self.pieces.len();
        self.pieces.extend(board.iter().map(PieceController::new));
        self.last.clear();
        self.publish();
        (start..self.pieces.len()).map(PieceId).collect()
    }

    /// Releases every piece and forgets the last move.
    pub fn clear(&mut self) {
        self.pieces.clear();
        self.last.clear();
        self.publish();
    }

    /// The id of the living piece in the given state.
    pub fn find(&self, state: PieceState) -> Result<PieceId, PieceNotFound> {
        self.pieces()
            .find(|(_, pc)| pc.is_alive() && pc.state() == state)
            .map(|(id, _)| id)
            .ok_or(PieceNotFound(state))
    }

    /// The [`PieceController`] of the living piece in the given state.
    pub fn find_piece(&self, state: PieceState) -> Result<&PieceController, PieceNotFound> {
        Ok(&self[self.find(state)?])
    }

    /// Whether the piece with the given id is a king in check.
    ///
    /// # Panics
    ///
    /// Panics if the id was not issued by this mover.
    pub fn is_in_check(&self, id: PieceId) -> bool {
        endgame::is_in_check(&self[id], self.pieces.iter())
    }

    /// Plays a [`Move`], capturing whatever stands on the destination square.
    ///
    /// A move that fails leaves the pieces untouched and the previous move revertible.
    #[instrument(level = "trace", skip(self, m), err, fields(%m))]
    pub fn play(&mut self, m: Move) -> Result<Board, MoveError> {
        let id = match self.pieces().find(|(_, pc)| pc.state() == m.piece()) {
            Some((id, _)) => id,
            None => return Err(PieceNotFound(m.piece()).into()),
        };

        self.pieces[id.0].move_to(m.whither())?;

        let mut last = vec![(id, m.whence())];
        for (i, pc) in self.pieces.iter_mut().enumerate() {
            if i != id.0 && pc.state().square() == Some(m.whither()) {
                debug!(captured = %pc.state());
                last.push((PieceId(i), pc.state().square()));
                pc.move_to_unchecked(None);
            }
        }

        self.last = last;
        self.publish();
        Ok(self.board.clone())
    }

    /// Reverts the last [`Move`], bringing captured pieces back to the board.
    ///
    /// Only one move is remembered, so undoing twice in a row fails.
    #[instrument(level = "trace", skip(self), err)]
    pub fn undo(&mut self) -> Result<Board, NothingToUndo> {
        if self.last.is_empty() {
            return Err(NothingToUndo);
        }

        for (id, sq) in self.last.drain(..) {
            let pc = &mut self.pieces[id.0];
            debug!(restored = %pc.state().relocated(sq));
            pc.move_to_unchecked(sq);
        }

        self.publish();
        Ok(self.board.clone())
    }

    fn publish(&mut self) {
        self.board = self.pieces.iter().map(PieceController::state).collect();
        for pc in &mut self.pieces {
            pc.update(&self.board);
        }
    }
}
