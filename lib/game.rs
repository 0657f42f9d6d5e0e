mod config;
mod status;

pub use config::*;
pub use status::*;

use crate::chess::{Board, Color, Move, PieceState, Role};
use crate::rules::{BoardMover, Endgame, MoveError};
use derive_more::{Display, Error, From};
use tracing::{debug, instrument};

/// The reason why a [`Move`] was rejected by the [`Game`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error, From)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum GameError {
    #[display(fmt = "the game is over by {_0}")]
    #[from(ignore)]
    GameOver(#[error(not(source))] Status),

    #[display(fmt = "it is not the {_0} player's turn")]
    #[from(ignore)]
    OutOfTurn(#[error(not(source))] Color),

    #[display(fmt = "the {_0} player may not leave their king in check")]
    #[from(ignore)]
    SelfCheck(#[error(not(source))] Color),

    #[display(fmt = "the {_0} player has no king")]
    #[from(ignore)]
    MissingKing(#[error(not(source))] Color),

    Move(MoveError),
}

/// Holds the state of a game of chess.
///
/// Players take turns, starting from the side configured to move first, until either
/// of them is mated or stalemated.
#[derive(Debug, Clone)]
pub struct Game {
    mover: BoardMover,
    turn: Color,
    status: Status,
}

impl Default for Game {
    /// A game from the standard starting arrangement, with white to move.
    fn default() -> Self {
        Game {
            mover: BoardMover::from(&Board::default()),
            turn: Color::White,
            status: Status::InProgress,
        }
    }
}

impl Game {
    /// Starts a game from the given [`GameConfig`].
    ///
    /// Both sides must have exactly one king on the board.
    pub fn with_config(config: GameConfig) -> Result<Self, GameError> {
        let status = Self::evaluate(&config.board, config.turn)?;
        Self::king(&config.board, !config.turn)?;

        Ok(Game {
            mover: BoardMover::from(&config.board),
            turn: config.turn,
            status,
        })
    }

    /// The current [`Board`].
    #[inline(always)]
    pub fn board(&self) -> &Board {
        self.mover.board()
    }

    /// The side to move.
    #[inline(always)]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The current [`Status`] from the point of view of the side to move.
    #[inline(always)]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Every move available to the side to move.
    pub fn moves(&self) -> Result<Vec<Move>, GameError> {
        let king = Self::king(self.board(), self.turn)?;
        let moves = Endgame::new(self.board())
            .legal_moves(king)
            .map_err(MoveError::from)?;

        Ok(moves)
    }

    /// Plays a [`Move`] and passes the turn.
    ///
    /// A move that would leave the mover's own king in check is reverted and rejected.
    #[instrument(level = "debug", skip(self, m), ret(Display), err, fields(%m, turn = %self.turn))]
    pub fn play(&mut self, m: Move) -> Result<Status, GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver(self.status));
        }

        if m.piece().color() != self.turn {
            return Err(GameError::OutOfTurn(m.piece().color()));
        }

        self.mover.play(m)?;

        let king = Self::king(self.board(), self.turn)?;
        let id = self.mover.find(king).map_err(MoveError::from)?;
        if self.mover.is_in_check(id) {
            self.mover.undo().map_err(|_| GameError::SelfCheck(self.turn))?;
            return Err(GameError::SelfCheck(self.turn));
        }

        self.status = Self::evaluate(self.board(), !self.turn)?;
        self.turn = !self.turn;
        debug!(status = %self.status, turn = %self.turn);

        Ok(self.status)
    }

    fn king(board: &Board, side: Color) -> Result<PieceState, GameError> {
        match board.king(side) {
            Some(sq) => Ok(PieceState::new(Role::King, side, sq)),
            None => Err(GameError::MissingKing(side)),
        }
    }

    fn evaluate(board: &Board, side: Color) -> Result<Status, GameError> {
        let king = Self::king(board, side)?;
        let status = Endgame::new(board)
            .status(king)
            .map_err(MoveError::from)?;

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{IllegalMove, Square};
    use crate::rules::PieceNotFound;
    use proptest::sample::Selector;
    use test_strategy::proptest;

    fn config(fen: &str, turn: Color) -> GameConfig {
        GameConfig {
            board: fen.parse().unwrap(),
            turn,
        }
    }

    fn mv(role: Role, color: Color, whence: Square, whither: Square) -> Move {
        Move::new(PieceState::new(role, color, whence), whither)
    }

    #[test]
    fn default_game_starts_with_white_to_move() {
        let game = Game::default();
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.status(), Status::InProgress);
        assert_eq!(game.board(), &Board::default());
        assert_eq!(game.moves().map(|ms| ms.len()), Ok(12));
    }

    #[test]
    fn default_config_starts_the_default_game() {
        let game = Game::with_config(GameConfig::default()).unwrap();
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.status(), Status::InProgress);
        assert_eq!(game.board(), &Board::default());
    }

    #[proptest]
    fn game_requires_both_kings(c: Color) {
        let cfg = config("8/8/8/8/8/8/8/4K3", c);
        assert_eq!(Game::with_config(cfg).err(), Some(GameError::MissingKing(Color::Black)));
    }

    #[proptest]
    fn players_take_turns(s: Selector) {
        let mut game = Game::default();
        let m = *s.select(game.moves()?.iter());
        assert_eq!(game.play(m), Ok(Status::InProgress));
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.play(m), Err(GameError::OutOfTurn(Color::White)));
    }

    #[test]
    fn illegal_move_is_rejected_without_passing_the_turn() {
        let mut game = Game::default();
        let m = mv(Role::Pawn, Color::White, Square::E2, Square::E4);

        assert_eq!(
            game.play(m),
            Err(GameError::Move(MoveError::IllegalMove(IllegalMove::Unreachable {
                color: Color::White,
                role: Role::Pawn,
                square: Square::E4
            })))
        );

        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.board(), &Board::default());
    }

    #[proptest]
    fn missing_piece_is_kept_as_the_source_of_the_error(s: PieceState) {
        let e = GameError::from(MoveError::from(PieceNotFound(s)));
        assert_eq!(e.to_string(), PieceNotFound(s).to_string());
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn missing_piece_is_rejected() {
        let mut game = Game::default();
        let m = mv(Role::Queen, Color::White, Square::E4, Square::E5);
        let e = PieceNotFound(m.piece());
        assert_eq!(game.play(m), Err(GameError::Move(e.into())));
    }

    #[test]
    fn move_exposing_the_king_is_reverted() {
        let cfg = config("4k3/4r3/8/8/8/8/4R3/4K3", Color::White);
        let mut game = Game::with_config(cfg.clone()).unwrap();

        assert_eq!(
            game.play(mv(Role::Rook, Color::White, Square::E2, Square::A2)),
            Err(GameError::SelfCheck(Color::White))
        );

        assert_eq!(game.board(), &cfg.board);
        assert_eq!(game.turn(), Color::White);
        assert_eq!(
            game.play(mv(Role::Rook, Color::White, Square::E2, Square::E7)),
            Ok(Status::Check)
        );
    }

    #[test]
    fn no_moves_are_accepted_once_the_game_is_over() {
        let cfg = config("7k/8/8/8/8/8/2q5/K7", Color::White);
        let mut game = Game::with_config(cfg).unwrap();

        assert_eq!(game.status(), Status::Stalemate);
        assert_eq!(game.moves(), Ok(vec![]));
        assert_eq!(
            game.play(mv(Role::King, Color::White, Square::A1, Square::B1)),
            Err(GameError::GameOver(Status::Stalemate))
        );
    }
}
