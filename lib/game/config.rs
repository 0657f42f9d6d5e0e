use crate::chess::{Board, Color};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Configuration for [`Game`][super::Game].
#[derive(Debug, Clone, Eq, PartialEq, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(deny_unknown_fields, rename = "config", default)]
pub struct GameConfig {
    /// The starting arrangement of the pieces.
    pub board: Board,

    /// The side to move first.
    pub turn: Color,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: Board::default(),
            turn: Color::White,
        }
    }
}

impl fmt::Display for GameConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ron::ser::to_string(self).map_err(|_| fmt::Error)?)
    }
}

/// The reason why parsing [`GameConfig`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse game configuration")]
pub struct ParseGameConfigError(ron::de::SpannedError);

impl FromStr for GameConfig {
    type Err = ParseGameConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}
