pub mod board;
pub mod common;
pub mod roster;
pub mod stone;

pub use board::Board;
pub use common::{Position, StoneId};
pub use roster::{Enemy, Player};
pub use stone::Stone;
