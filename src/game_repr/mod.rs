pub mod bitboards;
mod board;
mod fen;
mod movegen;
mod moves;
mod perft;
mod piece;
mod piece_moves;
pub mod square;
pub mod zobrist;

#[cfg(test)]
mod tests;

pub use board::*;
pub use fen::START_FEN;
pub use movegen::*;
pub use moves::*;
pub use piece::*;
