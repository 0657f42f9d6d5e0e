use super::Reach;
use crate::chess::{Bitboard, Board, IllegalMove, PieceState, Square};

/// Binds the state of one piece to its reachability on the latest observed [`Board`].
///
/// Controllers compare equal if their states do, the cached reachability is not
/// considered.
#[derive(Debug, Clone)]
pub struct PieceController {
    state: PieceState,
    reach: Reach,
}

impl PartialEq for PieceController {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl Eq for PieceController {}

impl From<PieceState> for PieceController {
    fn from(state: PieceState) -> Self {
        PieceController::new(state)
    }
}

impl PieceController {
    /// Takes control of a piece, with nothing cached until the first [`update`][Self::update].
    #[inline(always)]
    pub fn new(state: PieceState) -> Self {
        PieceController {
            state,
            reach: Reach::default(),
        }
    }

    /// The current state of the piece.
    #[inline(always)]
    pub fn state(&self) -> PieceState {
        self.state
    }

    /// Whether the piece is still on the board.
    #[inline(always)]
    pub fn is_alive(&self) -> bool {
        self.state.is_alive()
    }

    /// The squares this piece may move to.
    #[inline(always)]
    pub fn moveable(&self) -> Bitboard {
        self.reach.moveable
    }

    /// The squares this piece attacks or defends.
    #[inline(always)]
    pub fn threatened(&self) -> Bitboard {
        self.reach.threatened
    }

    /// Whether this piece may move to the given [`Square`].
    #[inline(always)]
    pub fn can_move_to(&self, sq: Square) -> bool {
        self.reach.moveable.contains(sq)
    }

    /// Whether this piece attacks or defends the given [`Square`].
    #[inline(always)]
    pub fn threatens(&self, sq: Square) -> bool {
        self.reach.threatened.contains(sq)
    }

    /// Moves the piece to a [`Square`] it can currently reach.
    pub fn move_to(&mut self, sq: Square) -> Result<(), IllegalMove> {
        if !self.is_alive() {
            return Err(IllegalMove::Captured {
                color: self.state.color(),
                role: self.state.role(),
            });
        }

        if !self.can_move_to(sq) {
            return Err(IllegalMove::Unreachable {
                color: self.state.color(),
                role: self.state.role(),
                square: sq,
            });
        }

        self.state = self.state.relocated(Some(sq));
        Ok(())
    }

    /// Relocates the piece anywhere, or takes it off the board, bypassing the rules.
    #[inline(always)]
    pub fn move_to_unchecked(&mut self, sq: Option<Square>) {
        self.state = self.state.relocated(sq);
    }

    /// Refreshes the cached reachability against a new [`Board`].
    ///
    /// A piece whose square is now held by the opposite color has been captured.
    pub fn update(&mut self, board: &Board) {
        if let Some(sq) = self.state.square() {
            if board.color_on(sq).is_some_and(|c| c != self.state.color()) {
                self.state = self.state.relocated(None);
            }
        }

        self.reach = Reach::compute(self.state, board);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{Color, Role};
    use proptest::sample::{select, Selector};
    use test_strategy::proptest;

    fn updated(state: PieceState, board: &Board) -> PieceController {
        let mut pc = PieceController::new(state);
        pc.update(board);
        pc
    }

    #[proptest]
    fn new_controller_reaches_nothing(s: PieceState) {
        let pc = PieceController::new(s);
        assert_eq!(pc.state(), s);
        assert_eq!(pc.moveable(), Bitboard::empty());
        assert_eq!(pc.threatened(), Bitboard::empty());
    }

    #[proptest]
    fn update_caches_the_reach_of_the_piece(
        #[filter({ let x = #b.alive().next().is_some(); x })] b: Board,
        #[strategy(select(Vec::from_iter(#b.alive())))] s: PieceState,
    ) {
        let pc = updated(s, &b);
        let reach = Reach::compute(s, &b);
        assert_eq!(pc.moveable(), reach.moveable);
        assert_eq!(pc.threatened(), reach.threatened);
    }

    #[proptest]
    fn update_is_idempotent(b: Board, s: PieceState) {
        let mut pc = updated(s, &b);
        let once = (pc.state(), pc.moveable(), pc.threatened());
        pc.update(&b);
        assert_eq!((pc.state(), pc.moveable(), pc.threatened()), once);
    }

    #[proptest]
    fn piece_is_captured_if_its_square_is_held_by_the_opposite_color(
        #[filter({ let x = #b.alive().next().is_some(); x })] b: Board,
        #[strategy(select(Vec::from_iter(#b.alive())))] s: PieceState,
    ) {
        let enemy = PieceState::new(s.role(), !s.color(), s.square().unwrap());
        let pc = updated(enemy, &b);

        assert_eq!(pc.state(), enemy.relocated(None));
        assert!(!pc.is_alive());
        assert_eq!(pc.moveable(), Bitboard::empty());
        assert_eq!(pc.threatened(), Bitboard::empty());
    }

    #[proptest]
    fn move_to_relocates_the_piece(b: Board, selector: Selector) {
        let candidates = Vec::from_iter(b.alive().flat_map(|s| {
            let moveable = Reach::compute(s, &b).moveable;
            moveable.into_iter().map(move |sq| (s, sq))
        }));

        if let Some(&(s, sq)) = selector.try_select(&candidates) {
            let mut pc = updated(s, &b);
            assert_eq!(pc.move_to(sq), Ok(()));
            assert_eq!(pc.state(), s.relocated(Some(sq)));
        }
    }

    #[proptest]
    fn move_to_fails_if_square_is_unreachable(
        b: Board,
        s: PieceState,
        #[filter(!Reach::compute(#s, &#b).moveable.contains(#sq))] sq: Square,
    ) {
        let mut pc = updated(s, &b);
        let before = pc.clone();
        assert!(pc.move_to(sq).is_err());
        assert_eq!(pc, before);
    }

    #[proptest]
    fn move_to_fails_if_piece_is_captured(b: Board, s: PieceState, sq: Square) {
        let mut pc = updated(s.relocated(None), &b);
        assert_eq!(
            pc.move_to(sq),
            Err(IllegalMove::Captured {
                color: s.color(),
                role: s.role()
            })
        );
    }

    #[proptest]
    fn move_to_unchecked_relocates_anywhere(s: PieceState, sq: Option<Square>) {
        let mut pc = PieceController::new(s);
        pc.move_to_unchecked(sq);
        assert_eq!(pc.state(), s.relocated(sq));
    }

    #[proptest]
    fn equality_ignores_cached_reach(b: Board, s: PieceState) {
        assert_eq!(PieceController::new(s), updated(s, &b));
    }

    #[test]
    fn unreachable_square_is_reported() {
        let b: Board = "8/8/8/8/8/8/8/N7".parse().unwrap();
        let mut pc = updated(PieceState::new(Role::Knight, Color::White, Square::A1), &b);

        assert_eq!(
            pc.move_to(Square::A3),
            Err(IllegalMove::Unreachable {
                color: Color::White,
                role: Role::Knight,
                square: Square::A3
            })
        );

        assert_eq!(pc.move_to(Square::B3), Ok(()));
        assert_eq!(pc.state().square(), Some(Square::B3));
    }
}
