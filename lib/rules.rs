mod controller;
mod endgame;
mod mover;
mod reach;

pub use controller::*;
pub use endgame::*;
pub use mover::*;
pub use reach::*;
