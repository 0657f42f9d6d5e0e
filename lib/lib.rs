/// Chess domain types.
pub mod chess;
/// The turn and status of a game of chess.
pub mod game;
/// Reachability, move application and endgame evaluation.
pub mod rules;
/// Assorted utilities.
pub mod util;
