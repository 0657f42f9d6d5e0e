use crate::util::Enum;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// The type of a chess [`Piece`][`crate::chess::Piece`].
#[derive(
    Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize,
)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Role {
    #[display(fmt = "pawn")]
    Pawn,
    #[display(fmt = "knight")]
    Knight,
    #[display(fmt = "bishop")]
    Bishop,
    /// Also known as the castle.
    #[display(fmt = "rook")]
    Rook,
    #[display(fmt = "queen")]
    Queen,
    #[display(fmt = "king")]
    King,
}

impl Role {
    /// Whether pieces of this role move along rays until blocked.
    #[inline(always)]
    pub fn is_sliding(&self) -> bool {
        matches!(self, Role::Bishop | Role::Rook | Role::Queen)
    }
}

unsafe impl Enum for Role {
    const RANGE: RangeInclusive<Self> = Role::Pawn..=Role::King;

    #[inline(always)]
    fn repr(&self) -> u8 {
        *self as _
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn role_guarantees_zero_value_optimization() {
        assert_eq!(size_of::<Option<Role>>(), size_of::<Role>());
    }

    #[test]
    fn only_bishops_rooks_and_queens_slide() {
        assert_eq!(
            Role::iter().filter(Role::is_sliding).collect::<Vec<_>>(),
            vec![Role::Bishop, Role::Rook, Role::Queen]
        );
    }
}
