pub mod board;
pub mod deck;

pub use board::*;
pub use deck::*;
