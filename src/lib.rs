//! Chess engine core: bitboard board and legal move generation, negamax
//! search with iterative deepening, and the text formats, opening book,
//! game history and UCI front end built on top of them.

pub mod ai;
pub mod book;
pub mod error;
pub mod game;
pub mod game_repr;
pub mod notation;
pub mod uci;

pub use error::{ChessError, Result};

/// Build the magic attack tables and Zobrist keys now instead of on first
/// use. Safe to call any number of times.
pub fn init() {
    game_repr::bitboards::magic::init();
    game_repr::zobrist::init();
}
